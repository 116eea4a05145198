//! Unified error type returned by every repository operation.
use thiserror::Error;

/// Errors that can occur in the body store, the grave store and the cemetery
/// operations.
///
/// Storage errors never leak as raw `sqlx::Error`: each public operation
/// converts them into `ServiceFailure` with the operation context attached.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// A required argument was absent. Always a caller bug.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The referenced entity is in the wrong lifecycle state for the operation:
    /// id already set or missing, row not found, grave full, body already
    /// buried, or more rows affected than expected.
    #[error("Illegal entity: {0}")]
    IllegalEntity(String),

    /// The entity violates a domain rule.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The underlying store failed, or its integrity is broken.
    #[error("Service failure: {message}")]
    ServiceFailure {
        message: String,
        #[source]
        source: Option<sqlx::Error>,
    },
}

/// Fieldless view of [`ManagerError`], for callers that only need to decide
/// how to present a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    IllegalEntity,
    Validation,
    ServiceFailure,
}

impl ManagerError {
    /// Create an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an illegal entity error.
    pub fn illegal_entity(msg: impl Into<String>) -> Self {
        Self::IllegalEntity(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Wrap a storage error with the context of the failed operation.
    pub fn service_failure(msg: impl Into<String>, source: sqlx::Error) -> Self {
        Self::ServiceFailure {
            message: msg.into(),
            source: Some(source),
        }
    }

    /// Report a broken store invariant, such as two rows sharing one id.
    pub fn integrity(msg: impl Into<String>) -> Self {
        Self::ServiceFailure {
            message: format!("Internal integrity error: {}", msg.into()),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::IllegalEntity(_) => ErrorKind::IllegalEntity,
            Self::Validation(_) => ErrorKind::Validation,
            Self::ServiceFailure { .. } => ErrorKind::ServiceFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(ManagerError::invalid_argument("body is null").kind(), ErrorKind::InvalidArgument);
        assert_eq!(ManagerError::illegal_entity("body id is null").kind(), ErrorKind::IllegalEntity);
        assert_eq!(ManagerError::validation("name is null").kind(), ErrorKind::Validation);
        assert_eq!(ManagerError::integrity("two rows").kind(), ErrorKind::ServiceFailure);
    }

    #[test]
    fn test_service_failure_keeps_source() {
        let err = ManagerError::service_failure("Error when getting all graves", sqlx::Error::PoolClosed);
        assert_eq!(err.to_string(), "Service failure: Error when getting all graves");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_integrity_error_message() {
        let err = ManagerError::integrity("2 bodies share id 5");
        assert_eq!(err.to_string(), "Service failure: Internal integrity error: 2 bodies share id 5");
        assert!(err.source().is_none());
    }
}
