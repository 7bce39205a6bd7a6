//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod building_feed;
mod building_repository;

pub use building_feed::{BuildingFeed, BuildingPublisher, BuildingSnapshot};
#[cfg(test)]
pub use building_repository::MockBuildingRepository;
pub use building_repository::{BuildingRepository, BuildingRepositoryError};
