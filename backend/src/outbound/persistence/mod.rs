//! SQLite persistence adapters using Diesel ORM.
//!
//! This module provides the durable implementation of the building repository
//! port, backed by SQLite through Diesel with async support from
//! `diesel-async`'s sync connection wrapper.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain buildings. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Single writer**: one migrated connection is shared behind an async
//!   mutex, which also serialises mutations.
//! - **Strongly typed errors**: database and mapping failures are mapped to
//!   `BuildingRepositoryError`.
//!
//! # Example
//!
//! ```ignore
//! use buildings::outbound::persistence::{ConnectionConfig, DbConnection, DieselBuildingRepository};
//!
//! let conn = DbConnection::open(ConnectionConfig::new("buildings.sqlite3")).await?;
//! let repo = DieselBuildingRepository::new(conn, Arc::new(DefaultClock)).await?;
//! ```

mod building_mapping;
mod connection;
mod diesel_building_repository;
mod models;
mod schema;

pub use building_mapping::BuildingMappingError;
pub use connection::{ConnectionConfig, ConnectionError, DbConnection, IN_MEMORY_URL};
pub use diesel_building_repository::DieselBuildingRepository;
