//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversion to and from domain buildings
//! lives in `building_mapping`.

use diesel::prelude::*;

use super::schema::buildings;

/// Flat persisted shape of a building.
///
/// `kind` is the variant discriminator; the parking columns are `None` for
/// buildings without parking.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = buildings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct BuildingRow {
    pub id: String,
    pub address: String,
    pub kind: String,
    pub parking_spaces: Option<i32>,
    pub monthly_parking_rent: Option<f64>,
}

/// Insertable struct for creating building records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = buildings)]
pub(crate) struct NewBuildingRow<'a> {
    pub id: &'a str,
    pub address: &'a str,
    pub kind: &'a str,
    pub parking_spaces: Option<i32>,
    pub monthly_parking_rent: Option<f64>,
    pub created_at: i64,
}

/// Changeset replacing every mutable column of a building.
///
/// `None` parking values are written as NULL so a building can switch to the
/// without-parking variant.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = buildings)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct BuildingChanges<'a> {
    pub address: &'a str,
    pub kind: &'a str,
    pub parking_spaces: Option<i32>,
    pub monthly_parking_rent: Option<f64>,
}

impl BuildingRow {
    /// Insertable view of this row stamped with its creation time.
    pub fn as_new(&self, created_at: i64) -> NewBuildingRow<'_> {
        NewBuildingRow {
            id: &self.id,
            address: &self.address,
            kind: &self.kind,
            parking_spaces: self.parking_spaces,
            monthly_parking_rent: self.monthly_parking_rent,
            created_at,
        }
    }

    /// Changeset view of this row.
    pub fn as_changes(&self) -> BuildingChanges<'_> {
        BuildingChanges {
            address: &self.address,
            kind: &self.kind,
            parking_spaces: self.parking_spaces,
            monthly_parking_rent: self.monthly_parking_rent,
        }
    }
}
