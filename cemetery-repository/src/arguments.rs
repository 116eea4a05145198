//! Argument and lifecycle checks shared by every repository operation.
use crate::errors::ManagerError;

/// Unwraps a required argument, reporting its absence as `InvalidArgument`.
pub(crate) fn require<T>(argument: Option<T>, name: &str) -> Result<T, ManagerError> {
    argument.ok_or_else(|| ManagerError::invalid_argument(format!("{} is null", name)))
}

/// Unwraps the id of an entity that must already be persisted, reporting its
/// absence as `IllegalEntity`.
pub(crate) fn require_id(id: Option<i64>, name: &str) -> Result<i64, ManagerError> {
    id.ok_or_else(|| ManagerError::illegal_entity(format!("{} id is null", name)))
}
