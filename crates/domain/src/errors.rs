//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Code is not part of the recognized set
    #[error("Unknown database error code: {0}")]
    UnknownErrorCode(String),

    /// Payload does not have the shape of a database error
    #[error("Invalid database error: {0}")]
    InvalidDatabaseError(String),
}
