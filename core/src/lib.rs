//! Core services for the Shamba farm records platform
//!
//! Wires the in-process entity store, the domain services, and the
//! configuration and error machinery together for embedding applications.

pub mod config;
pub mod error;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use store::FarmStore;
