//! State for the single-building screen.

use std::sync::Arc;

use tracing::warn;

use crate::domain::ports::{BuildingRepository, BuildingRepositoryError};
use crate::domain::{Building, BuildingId, BuildingUseCases};

/// What the detail screen currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// Nothing loaded yet, or a load is in progress.
    Loading,
    /// The requested building.
    Loaded(Building),
    /// Message explaining why nothing could be shown.
    Failed(String),
}

/// Loads one building and offers to delete it.
pub struct BuildingDetail<R> {
    use_cases: Arc<BuildingUseCases<R>>,
    state: DetailState,
}

impl<R: BuildingRepository> BuildingDetail<R> {
    /// Detail holder in the `Loading` state.
    pub fn new(use_cases: Arc<BuildingUseCases<R>>) -> Self {
        Self {
            use_cases,
            state: DetailState::Loading,
        }
    }

    /// Current state.
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Load the building with `id`.
    pub async fn load(&mut self, raw_id: &str) -> &DetailState {
        self.state = DetailState::Loading;
        let Ok(id) = BuildingId::new(raw_id) else {
            self.state = DetailState::Failed("Building not found".to_owned());
            return &self.state;
        };
        self.state = match self.use_cases.get_by_id.execute(&id).await {
            Ok(Some(building)) => DetailState::Loaded(building),
            Ok(None) => DetailState::Failed("Building not found".to_owned()),
            Err(err) => {
                warn!(%id, error = %err, "loading building failed");
                DetailState::Failed(format!("Failed to load building: {err}"))
            }
        };
        &self.state
    }

    /// Delete the loaded building; does nothing unless a building is loaded.
    pub async fn delete(&self) -> Result<(), BuildingRepositoryError> {
        match &self.state {
            DetailState::Loaded(building) => self.use_cases.delete.execute(building).await,
            DetailState::Loading | DetailState::Failed(_) => Ok(()),
        }
    }
}
