//! State for the building list screen.

use std::sync::Arc;

use crate::domain::ports::{
    BuildingFeed, BuildingRepository, BuildingRepositoryError, BuildingSnapshot,
};
use crate::domain::{Building, BuildingUseCases};

/// Address fragment behind the "Tverskaya street" shortcut.
pub const TVERSKAYA_QUERY: &str = "Тверская";

/// Live list of every stored building.
pub struct BuildingsList<R> {
    use_cases: Arc<BuildingUseCases<R>>,
    feed: BuildingFeed,
    buildings: BuildingSnapshot,
}

impl<R: BuildingRepository> BuildingsList<R> {
    /// Subscribe to the collection, starting from its current snapshot.
    pub fn new(use_cases: Arc<BuildingUseCases<R>>) -> Self {
        let mut feed = use_cases.get_all.execute();
        let buildings = feed.current();
        Self {
            use_cases,
            feed,
            buildings,
        }
    }

    /// Buildings as last observed.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    /// Pick up the latest snapshot without waiting.
    pub fn refresh(&mut self) -> &[Building] {
        self.buildings = self.feed.current();
        &self.buildings
    }

    /// Wait for the next change to the collection.
    ///
    /// Returns `false` once the repository stops publishing.
    pub async fn next_change(&mut self) -> bool {
        match self.feed.changed().await {
            Some(snapshot) => {
                self.buildings = snapshot;
                true
            }
            None => false,
        }
    }

    /// Delete `building`; the list updates through the feed.
    pub async fn delete(&self, building: &Building) -> Result<(), BuildingRepositoryError> {
        self.use_cases.delete.execute(building).await
    }

    /// Buildings on Tverskaya street.
    pub async fn tverskaya(&self) -> Result<Vec<Building>, BuildingRepositoryError> {
        self.use_cases.search.execute(TVERSKAYA_QUERY).await
    }
}
