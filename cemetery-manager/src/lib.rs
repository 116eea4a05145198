//! Cemetery Manager Library
//!
//! Configuration loading, dependency wiring and the startup readiness summary
//! for the cemetery manager service.

pub mod config;
pub mod errors;
pub mod summary;

pub use config::{Dependencies, LogFormat, ManagerConfig};
pub use errors::{AppError, ConfigError};
pub use summary::ReadinessSummary;
