//! Process-local `BuildingRepository` keeping buildings in insertion order.
//!
//! Nothing survives the process. The console uses it when started with
//! `--in-memory`, and tests use it as a real (non-mocked) adapter.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{
    BuildingFeed, BuildingPublisher, BuildingRepository, BuildingRepositoryError,
};
use crate::domain::{Building, BuildingId};

/// In-memory implementation of the `BuildingRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryBuildingRepository {
    buildings: Mutex<Vec<Building>>,
    publisher: BuildingPublisher,
}

impl InMemoryBuildingRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `buildings`; later entries win on id clashes.
    pub fn with_buildings(buildings: impl IntoIterator<Item = Building>) -> Self {
        let mut stored: Vec<Building> = Vec::new();
        for building in buildings {
            upsert(&mut stored, building);
        }
        let publisher = BuildingPublisher::new(stored.clone());
        Self {
            buildings: Mutex::new(stored),
            publisher,
        }
    }
}

fn upsert(stored: &mut Vec<Building>, building: Building) {
    match stored.iter_mut().find(|existing| existing.id() == building.id()) {
        Some(slot) => *slot = building,
        None => stored.push(building),
    }
}

#[async_trait]
impl BuildingRepository for InMemoryBuildingRepository {
    fn list(&self) -> BuildingFeed {
        self.publisher.subscribe()
    }

    async fn get_by_id(&self, id: &BuildingId) -> Result<Option<Building>, BuildingRepositoryError> {
        let stored = self.buildings.lock().await;
        Ok(stored.iter().find(|building| building.id() == id).cloned())
    }

    async fn add(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        let mut stored = self.buildings.lock().await;
        upsert(&mut stored, building.clone());
        self.publisher.publish(stored.clone());
        Ok(())
    }

    async fn update(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        let mut stored = self.buildings.lock().await;
        let Some(slot) = stored.iter_mut().find(|existing| existing.id() == building.id()) else {
            debug!(id = %building.id(), "update ignored: no building with this id");
            return Ok(());
        };
        *slot = building.clone();
        self.publisher.publish(stored.clone());
        Ok(())
    }

    async fn delete(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        let mut stored = self.buildings.lock().await;
        let before = stored.len();
        stored.retain(|existing| existing.id() != building.id());
        if stored.len() != before {
            self.publisher.publish(stored.clone());
        }
        Ok(())
    }

    async fn search_by_address(
        &self,
        query: &str,
    ) -> Result<Vec<Building>, BuildingRepositoryError> {
        let stored = self.buildings.lock().await;
        Ok(stored
            .iter()
            .filter(|building| building.address().matches_query(query))
            .cloned()
            .collect())
    }
}
