mod body;
mod gender;
mod grave;

pub use body::Body;
pub use gender::{Gender, ParseGenderError};
pub use grave::Grave;

/// Store-assigned identifier of a body.
pub type BodyId = i64;

/// Store-assigned identifier of a grave.
pub type GraveId = i64;
