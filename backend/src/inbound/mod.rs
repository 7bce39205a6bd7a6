//! Inbound adapters that translate user input into use case calls while
//! keeping terminal details at the edge.
//!
//! The line-oriented console lives under [`console`].

pub mod console;
