//! Shared types and models for the Shamba farm records platform
//!
//! This crate contains the domain model, the pure derivation functions that
//! compute record-level facts from stored fields, and the aggregation helpers
//! used by the core services and any embedding application.

pub mod models;
pub mod rollup;
pub mod types;
pub mod validation;

pub use models::*;
pub use rollup::*;
pub use types::*;
pub use validation::*;
