//! Raw database error entity
//!
//! The error as reported by a database client, before it is translated into
//! the application's own error vocabulary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{errors::DomainError, value_objects::KnownErrorCode};

/// Error object produced by a database client
///
/// Only `code` and `message` carry meaning for classification. Any other
/// fields the client reports are kept in `meta` so they survive for
/// diagnostics; they are flattened next to `code` and `message` when
/// serialized. `meta` never holds the keys `code` or `message`.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct RawDatabaseError {
    /// Short identifier assigned by the client (e.g. "P2002")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human-readable description
    pub message: String,

    /// Additional client-specific fields
    #[serde(flatten)]
    meta: Map<String, Value>,
}

/// Keys owned by the named fields; a flattened entry would shadow them
const RESERVED_KEYS: &[&str] = &["code", "message"];

impl RawDatabaseError {
    /// Create a raw error with only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            meta: Map::new(),
        }
    }

    /// Set the client error code
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach an additional client-specific field
    ///
    /// The reserved keys `code` and `message` are ignored; use
    /// [`Self::with_code`] or [`Self::new`] for those.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !RESERVED_KEYS.contains(&key.as_str()) {
            self.meta.insert(key, value.into());
        }
        self
    }

    /// Additional client-specific fields
    #[must_use]
    pub const fn meta(&self) -> &Map<String, Value> {
        &self.meta
    }

    /// The recognized code, if the reported code is one
    #[must_use]
    pub fn known_code(&self) -> Option<KnownErrorCode> {
        self.code.as_deref().and_then(KnownErrorCode::from_code)
    }
}

impl TryFrom<Value> for RawDatabaseError {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if !value.is_object() {
            return Err(DomainError::InvalidDatabaseError(
                "expected a JSON object".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| DomainError::InvalidDatabaseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_has_no_code() {
        let err = RawDatabaseError::new("Connection timed out");
        assert_eq!(err.code, None);
        assert_eq!(err.message, "Connection timed out");
        assert!(err.meta.is_empty());
        assert_eq!(err.known_code(), None);
    }

    #[test]
    fn known_code_for_unique_violation() {
        let err = RawDatabaseError::new("dup").with_code("P2002");
        assert_eq!(
            err.known_code(),
            Some(KnownErrorCode::UniqueConstraintViolation)
        );
    }

    #[test]
    fn unknown_code_is_not_known() {
        let err = RawDatabaseError::new("Foreign key constraint failed").with_code("P2003");
        assert_eq!(err.known_code(), None);
        assert_eq!(err.code.as_deref(), Some("P2003"));
    }

    #[test]
    fn display_is_message() {
        let err = RawDatabaseError::new("Unique constraint failed").with_code("P2002");
        assert_eq!(err.to_string(), "Unique constraint failed");
    }

    #[test]
    fn try_from_keeps_extra_fields() {
        let value = json!({
            "code": "P2002",
            "message": "Unique constraint failed on the fields: (email)",
            "meta": { "target": ["email"] },
            "clientVersion": "5.0.0"
        });

        let err = RawDatabaseError::try_from(value).unwrap();
        assert_eq!(err.code.as_deref(), Some("P2002"));
        assert_eq!(err.meta["clientVersion"], json!("5.0.0"));
        assert_eq!(err.meta["meta"], json!({ "target": ["email"] }));
    }

    #[test]
    fn try_from_message_only() {
        let err = RawDatabaseError::try_from(json!({ "message": "Connection timed out" })).unwrap();
        assert_eq!(err, RawDatabaseError::new("Connection timed out"));
    }

    #[test]
    fn try_from_rejects_non_object() {
        let result = RawDatabaseError::try_from(json!("boom"));
        assert!(matches!(result, Err(DomainError::InvalidDatabaseError(_))));
    }

    #[test]
    fn try_from_rejects_missing_message() {
        let result = RawDatabaseError::try_from(json!({ "code": "P2002" }));
        assert!(matches!(result, Err(DomainError::InvalidDatabaseError(_))));
    }

    #[test]
    fn serialization_flattens_meta() {
        let err = RawDatabaseError::new("dup")
            .with_code("P2002")
            .with_meta("table", "users");
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({ "code": "P2002", "message": "dup", "table": "users" })
        );
    }

    #[test]
    fn with_meta_ignores_reserved_keys() {
        let err = RawDatabaseError::new("dup")
            .with_code("P2002")
            .with_meta("code", "X")
            .with_meta("message", "shadowed");

        assert!(err.meta().is_empty());
        assert_eq!(err.known_code(), Some(KnownErrorCode::UniqueConstraintViolation));
    }

    #[test]
    fn unique_violation_survives_json_round_trip() {
        let err = RawDatabaseError::new("dup")
            .with_code("P2002")
            .with_meta("code", "X")
            .with_meta("table", "users");

        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(
            value,
            json!({ "code": "P2002", "message": "dup", "table": "users" })
        );

        let parsed = RawDatabaseError::try_from(value).unwrap();
        assert_eq!(parsed, err);
        assert_eq!(
            parsed.known_code(),
            Some(KnownErrorCode::UniqueConstraintViolation)
        );
    }

    #[test]
    fn serialization_omits_absent_code() {
        let value = serde_json::to_value(RawDatabaseError::new("boom")).unwrap();
        assert_eq!(value, json!({ "message": "boom" }));
    }
}
