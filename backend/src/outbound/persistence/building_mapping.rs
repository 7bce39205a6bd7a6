//! Conversion between persisted building rows and domain buildings.
//!
//! `to_row` is total. `to_domain` fails only when a stored row cannot describe
//! a valid building, which means the table holds corrupt data.

use thiserror::Error;

use crate::domain::ports::BuildingRepositoryError;
use crate::domain::{
    Address, Building, BuildingId, BuildingKind, BuildingValidationError, Parking,
};

use super::models::BuildingRow;

/// Reasons a stored row cannot be mapped to a building.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildingMappingError {
    /// The discriminator names no known variant.
    #[error("unknown building type: {kind}")]
    UnknownKind { kind: String },
    /// A `WITH_PARKING` row lacks one of its parking columns.
    #[error("building {id} is marked {kind} but has no {column}")]
    MissingParking {
        id: String,
        kind: &'static str,
        column: &'static str,
    },
    /// A stored field breaks a domain invariant.
    #[error("building {id} holds an invalid value: {source}")]
    InvalidField {
        id: String,
        source: BuildingValidationError,
    },
}

impl From<BuildingMappingError> for BuildingRepositoryError {
    fn from(error: BuildingMappingError) -> Self {
        Self::mapping(error.to_string())
    }
}

/// Convert a stored row into a domain building.
pub(crate) fn to_domain(row: &BuildingRow) -> Result<Building, BuildingMappingError> {
    let kind = BuildingKind::from_discriminator(&row.kind).ok_or_else(|| {
        BuildingMappingError::UnknownKind {
            kind: row.kind.clone(),
        }
    })?;
    let invalid = |source| BuildingMappingError::InvalidField {
        id: row.id.clone(),
        source,
    };
    let id = BuildingId::new(row.id.as_str()).map_err(invalid)?;
    let address = Address::new(row.address.as_str()).map_err(invalid)?;

    match kind {
        BuildingKind::WithoutParking => Ok(Building::without_parking(id, address)),
        BuildingKind::WithParking => {
            let missing = |column| BuildingMappingError::MissingParking {
                id: row.id.clone(),
                kind: kind.discriminator(),
                column,
            };
            let spaces = row.parking_spaces.ok_or_else(|| missing("parking_spaces"))?;
            let rent = row
                .monthly_parking_rent
                .ok_or_else(|| missing("monthly_parking_rent"))?;
            let parking = Parking::try_from_raw(spaces, rent).map_err(invalid)?;
            Ok(Building::with_parking(id, address, parking))
        }
    }
}

/// Convert a domain building into its stored row.
pub(crate) fn to_row(building: &Building) -> BuildingRow {
    let parking = building.parking();
    BuildingRow {
        id: building.id().as_ref().to_owned(),
        address: building.address().as_ref().to_owned(),
        kind: building.kind().discriminator().to_owned(),
        parking_spaces: parking.map(|parking| parking.spaces().get()),
        monthly_parking_rent: parking.map(|parking| parking.monthly_rent().get()),
    }
}
