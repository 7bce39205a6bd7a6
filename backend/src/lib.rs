//! Office building registry.
//!
//! Buildings either lack parking or carry a number of parking spaces with a
//! monthly rent per space. The crate is laid out hexagonally:
//!
//! - [`domain`]: building types, validation, the repository port, and use
//!   cases;
//! - [`outbound`]: SQLite and in-memory repository adapters;
//! - [`presentation`]: state holders for list, detail, and edit screens;
//! - [`inbound`]: the interactive console;
//! - [`config`]: settings for the console binary.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod presentation;
