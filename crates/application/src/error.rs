//! Application-level errors

use domain::RawDatabaseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors surfaced to application logic after database error translation
///
/// Serialized with a `kind` tag:
/// `{"kind":"UniqueConstraintError","source":{..}}` or
/// `{"kind":"DatabaseError","message":".."}`.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ApplicationError {
    /// A write duplicated a value that must be unique
    ///
    /// Keeps the full raw error for diagnostics.
    #[error("Unique constraint violation: {source}")]
    #[serde(rename = "UniqueConstraintError")]
    UniqueConstraint { source: RawDatabaseError },

    /// Any other database failure, reduced to its message
    #[error("Database error: {message}")]
    #[serde(rename = "DatabaseError")]
    Database { message: String },
}

/// Discriminant of [`ApplicationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationErrorKind {
    /// Tag of [`ApplicationError::UniqueConstraint`]
    UniqueConstraintError,
    /// Tag of [`ApplicationError::Database`]
    DatabaseError,
}

impl ApplicationErrorKind {
    /// The serialized `kind` tag
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UniqueConstraintError => "UniqueConstraintError",
            Self::DatabaseError => "DatabaseError",
        }
    }
}

impl fmt::Display for ApplicationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApplicationError {
    /// Create a generic database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// The kind tag of this error
    #[must_use]
    pub const fn kind(&self) -> ApplicationErrorKind {
        match self {
            Self::UniqueConstraint { .. } => ApplicationErrorKind::UniqueConstraintError,
            Self::Database { .. } => ApplicationErrorKind::DatabaseError,
        }
    }

    /// The underlying human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::UniqueConstraint { source } => &source.message,
            Self::Database { message } => message,
        }
    }

    /// Check if this error is a unique-constraint violation
    #[must_use]
    pub const fn is_unique_constraint(&self) -> bool {
        matches!(self, Self::UniqueConstraint { .. })
    }

    /// Check if this error should be reported as a conflict with existing state
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        self.is_unique_constraint()
    }
}
