//! Port for building persistence.
//!
//! The [`BuildingRepository`] trait is the contract every storage adapter
//! honours: an id-keyed collection of [`Building`] values with upsert, full
//! replacement, deletion, address search, and a live view of the whole
//! collection.

use async_trait::async_trait;

use crate::domain::{Building, BuildingId};

use super::building_feed::BuildingFeed;
use super::define_port_error;

define_port_error! {
    /// Errors raised by building repository adapters.
    pub enum BuildingRepositoryError {
        /// Storage could not be reached.
        Connection { message: String } =>
            "building repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "building repository query failed: {message}",
        /// A stored row does not describe a valid building. Indicates corrupt
        /// data; callers are not expected to recover.
        Mapping { message: String } =>
            "stored building could not be mapped: {message}",
    }
}

/// Port for building storage and retrieval.
///
/// # Semantics
///
/// - [`add`](Self::add) inserts, or replaces the building with the same id.
/// - [`update`](Self::update) replaces the building with the same id and does
///   nothing when no building matches.
/// - [`delete`](Self::delete) removes by id and does nothing when absent.
/// - [`search_by_address`](Self::search_by_address) keeps collection order.
///
/// Every successful mutation publishes a fresh snapshot to open feeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildingRepository: Send + Sync {
    /// Subscribe to the live collection.
    fn list(&self) -> BuildingFeed;

    /// Fetch a building by id; `None` when absent.
    async fn get_by_id(&self, id: &BuildingId) -> Result<Option<Building>, BuildingRepositoryError>;

    /// Insert or replace a building by id.
    async fn add(&self, building: &Building) -> Result<(), BuildingRepositoryError>;

    /// Replace the building with the same id, if any.
    async fn update(&self, building: &Building) -> Result<(), BuildingRepositoryError>;

    /// Remove the building with the same id, if any.
    async fn delete(&self, building: &Building) -> Result<(), BuildingRepositoryError>;

    /// Buildings whose address contains `query`, ignoring case.
    async fn search_by_address(&self, query: &str)
    -> Result<Vec<Building>, BuildingRepositoryError>;
}
