//! Configuration module for the cemetery manager.
//! Reads settings from the environment and wires the repositories.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{LogFormat, ManagerConfig};
