//! # riskgraph-core
//!
//! Shared foundation for the riskgraph engine: per-subsystem error enums,
//! layered TOML configuration, the event system, tracing setup, compiled
//! defaults, and the collection types used across the analysis crate.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
