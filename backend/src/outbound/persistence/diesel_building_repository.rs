//! SQLite-backed `BuildingRepository` implementation using Diesel ORM.
//!
//! Every mutation runs while holding the shared connection, then reloads the
//! ordered table and publishes it, so open feeds see each committed change in
//! order. Rows are listed by creation time with the insertion sequence as the
//! tie-breaker.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    BuildingFeed, BuildingPublisher, BuildingRepository, BuildingRepositoryError,
};
use crate::domain::{Building, BuildingId};

use super::building_mapping::{to_domain, to_row};
use super::connection::{AsyncSqliteConnection, DbConnection};
use super::models::BuildingRow;
use super::schema::buildings;

/// Diesel-backed implementation of the `BuildingRepository` port.
///
/// `add` is an upsert keyed by building id: a re-added building keeps its
/// original creation time and list position.
#[derive(Clone)]
pub struct DieselBuildingRepository {
    conn: DbConnection,
    clock: Arc<dyn Clock>,
    publisher: Arc<BuildingPublisher>,
}

impl DieselBuildingRepository {
    /// Create a repository over a migrated connection.
    ///
    /// The current table is loaded once so the first feed subscriber sees the
    /// stored buildings immediately.
    ///
    /// # Errors
    ///
    /// Fails when the table cannot be read or holds a row that does not map
    /// to a building.
    pub async fn new(
        conn: DbConnection,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, BuildingRepositoryError> {
        let initial = {
            let mut guard = conn.lock().await;
            load_ordered(&mut guard).await?
        };
        debug!(count = initial.len(), "loaded stored buildings");
        Ok(Self {
            conn,
            clock,
            publisher: Arc::new(BuildingPublisher::new(initial)),
        })
    }

    fn now_millis(&self) -> i64 {
        self.clock.utc().timestamp_millis()
    }

    async fn publish_from(
        &self,
        conn: &mut AsyncSqliteConnection,
    ) -> Result<(), BuildingRepositoryError> {
        let snapshot = load_ordered(conn).await?;
        self.publisher.publish(snapshot);
        Ok(())
    }
}

/// Map Diesel errors to domain building repository errors.
fn map_diesel_error(error: diesel::result::Error) -> BuildingRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => BuildingRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => BuildingRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            BuildingRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            BuildingRepositoryError::query("building id already stored")
        }
        _ => BuildingRepositoryError::query("database error"),
    }
}

fn rows_to_buildings(rows: &[BuildingRow]) -> Result<Vec<Building>, BuildingRepositoryError> {
    rows.iter()
        .map(|row| to_domain(row).map_err(BuildingRepositoryError::from))
        .collect()
}

async fn load_ordered(
    conn: &mut AsyncSqliteConnection,
) -> Result<Vec<Building>, BuildingRepositoryError> {
    let rows: Vec<BuildingRow> = buildings::table
        .order((buildings::created_at.asc(), buildings::seq.asc()))
        .select(BuildingRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;
    rows_to_buildings(&rows)
}

#[async_trait]
impl BuildingRepository for DieselBuildingRepository {
    fn list(&self) -> BuildingFeed {
        self.publisher.subscribe()
    }

    async fn get_by_id(&self, id: &BuildingId) -> Result<Option<Building>, BuildingRepositoryError> {
        let mut conn = self.conn.lock().await;

        let row: Option<BuildingRow> = buildings::table
            .filter(buildings::id.eq(id.as_ref()))
            .select(BuildingRow::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.as_ref()
            .map(|row| to_domain(row).map_err(BuildingRepositoryError::from))
            .transpose()
    }

    async fn add(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        let row = to_row(building);
        let created_at = self.now_millis();
        let mut conn = self.conn.lock().await;

        diesel::insert_into(buildings::table)
            .values(&row.as_new(created_at))
            .on_conflict(buildings::id)
            .do_update()
            .set(&row.as_changes())
            .execute(&mut *conn)
            .await
            .map_err(map_diesel_error)?;

        self.publish_from(&mut conn).await
    }

    async fn update(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        let row = to_row(building);
        let mut conn = self.conn.lock().await;

        let updated = diesel::update(buildings::table.filter(buildings::id.eq(row.id.as_str())))
            .set(&row.as_changes())
            .execute(&mut *conn)
            .await
            .map_err(map_diesel_error)?;

        if updated == 0 {
            debug!(id = %building.id(), "update ignored: no building with this id");
            return Ok(());
        }
        self.publish_from(&mut conn).await
    }

    async fn delete(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        let mut conn = self.conn.lock().await;

        let target = buildings::table.filter(buildings::id.eq(building.id().as_ref()));
        let deleted = diesel::delete(target)
            .execute(&mut *conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Ok(());
        }
        self.publish_from(&mut conn).await
    }

    async fn search_by_address(
        &self,
        query: &str,
    ) -> Result<Vec<Building>, BuildingRepositoryError> {
        let mut conn = self.conn.lock().await;
        let mut found = load_ordered(&mut conn).await?;
        found.retain(|building| building.address().matches_query(query));
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, BuildingRepositoryError::Query { .. }));
    }

    #[rstest]
    fn corrupt_rows_fail_the_whole_load() {
        let rows = vec![
            BuildingRow {
                id: "ok".to_owned(),
                address: "Арбат, 1".to_owned(),
                kind: "WITHOUT_PARKING".to_owned(),
                parking_spaces: None,
                monthly_parking_rent: None,
            },
            BuildingRow {
                id: "bad".to_owned(),
                address: "Арбат, 2".to_owned(),
                kind: "BASEMENT".to_owned(),
                parking_spaces: None,
                monthly_parking_rent: None,
            },
        ];

        let err = rows_to_buildings(&rows).expect_err("unknown kind");
        assert!(matches!(err, BuildingRepositoryError::Mapping { .. }));
    }
}
