//! # Cemetery Shared
//! This crate defines the entity types used across the cemetery manager crates:
//! bodies, graves and the gender of a body.
pub mod types;
