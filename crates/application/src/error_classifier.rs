//! Database error classification
//!
//! Translates a [`RawDatabaseError`] into exactly one [`ApplicationError`]
//! variant, keyed on the raw error's code. Classification is total: codes
//! outside [`KnownErrorCode`] always degrade to the generic variant.

use domain::{KnownErrorCode, RawDatabaseError};

use crate::error::ApplicationError;

/// Classify a raw database error
///
/// A unique-constraint violation keeps the whole raw error. Every other
/// error, including one without a code, keeps only its message.
///
/// # Examples
///
/// ```
/// use application::{ApplicationError, classify};
/// use domain::RawDatabaseError;
///
/// let err = classify(RawDatabaseError::new("Connection timed out"));
/// assert_eq!(err, ApplicationError::database("Connection timed out"));
/// ```
#[must_use]
pub fn classify(error: RawDatabaseError) -> ApplicationError {
    match error.known_code() {
        Some(KnownErrorCode::UniqueConstraintViolation) => {
            ApplicationError::UniqueConstraint { source: error }
        },
        None => ApplicationError::Database {
            message: error.message,
        },
    }
}

/// Classify a borrowed raw error, cloning what the result keeps
#[must_use]
pub fn classify_ref(error: &RawDatabaseError) -> ApplicationError {
    classify(error.clone())
}
