//! Known database error codes
//!
//! The closed set of client error codes that classification recognizes by
//! name. Any code outside this set is treated as a generic database failure.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::KnownErrorCode;
//!
//! assert_eq!(
//!     KnownErrorCode::from_code("P2002"),
//!     Some(KnownErrorCode::UniqueConstraintViolation)
//! );
//! assert_eq!(KnownErrorCode::from_code("P2003"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::errors::DomainError;

/// Database error code recognized by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownErrorCode {
    /// A write was rejected because it duplicates a value that must be unique
    #[serde(rename = "P2002")]
    UniqueConstraintViolation,
}

impl KnownErrorCode {
    /// Every recognized code
    pub const ALL: &'static [Self] = &[Self::UniqueConstraintViolation];

    /// The wire code as reported by the database client
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UniqueConstraintViolation => "P2002",
        }
    }

    /// Look up a code using exact, case-sensitive comparison
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|known| known.as_str() == code)
    }
}

impl fmt::Display for KnownErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownErrorCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| DomainError::UnknownErrorCode(s.to_string()))
    }
}
