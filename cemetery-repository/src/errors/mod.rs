//! Error types for the cemetery repository.
//! Consolidates and re-exports the error taxonomy shared by the body store,
//! the grave store and the cemetery operations.
mod manager;

pub use manager::{ErrorKind, ManagerError};
