//! This module defines and re-exports the interfaces of the cemetery repository.
//! It serves as a central point for accessing the store and cemetery traits.
mod bodies;
mod cemetery;
mod graves;

pub use bodies::BodyRepository;
pub use cemetery::CemeteryRepository;
pub use graves::GraveRepository;
