//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: SQLite-backed repository using Diesel ORM
//! - **in_memory**: process-local repository for ephemeral sessions and tests
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod in_memory;
pub mod persistence;

pub use in_memory::InMemoryBuildingRepository;
