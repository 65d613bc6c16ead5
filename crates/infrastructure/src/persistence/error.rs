//! Shared error mapping for the persistence layer
//!
//! Database clients report failures in their own vocabulary. Each client
//! error is first reduced to a [`RawDatabaseError`], with the client's
//! unique-violation signal normalized to [`KnownErrorCode::UniqueConstraintViolation`],
//! and then handed to the application classifier.

use application::{ApplicationError, classify};
use domain::{KnownErrorCode, RawDatabaseError};
use rusqlite::ffi;
use tracing::{debug, warn};

/// An error produced by a database client that can be reduced to a raw error
pub trait DatabaseClientError {
    /// Reduce this error to the client-agnostic raw shape
    fn to_raw_database_error(&self) -> RawDatabaseError;

    /// Whether this error only reports that a lookup matched no rows
    fn is_not_found(&self) -> bool {
        false
    }
}

impl DatabaseClientError for RawDatabaseError {
    fn to_raw_database_error(&self) -> RawDatabaseError {
        self.clone()
    }
}

impl DatabaseClientError for sqlx::Error {
    fn to_raw_database_error(&self) -> RawDatabaseError {
        match self {
            sqlx::Error::Database(db_err) => {
                let native_code = db_err.code().map(|c| c.into_owned());
                let code = if db_err.is_unique_violation() {
                    Some(KnownErrorCode::UniqueConstraintViolation.as_str().to_string())
                } else {
                    native_code.clone()
                };

                let mut raw = RawDatabaseError::new(db_err.message()).with_meta("client", "sqlx");
                raw.code = code;
                if let Some(native_code) = native_code {
                    raw = raw.with_meta("native_code", native_code);
                }
                if let Some(constraint) = db_err.constraint() {
                    raw = raw.with_meta("constraint", constraint);
                }
                if let Some(table) = db_err.table() {
                    raw = raw.with_meta("table", table);
                }
                raw
            },
            sqlx::Error::RowNotFound => {
                RawDatabaseError::new("Database record not found").with_meta("client", "sqlx")
            },
            other => RawDatabaseError::new(other.to_string()).with_meta("client", "sqlx"),
        }
    }

    fn is_not_found(&self) -> bool {
        matches!(self, sqlx::Error::RowNotFound)
    }
}

impl DatabaseClientError for rusqlite::Error {
    fn to_raw_database_error(&self) -> RawDatabaseError {
        match self {
            rusqlite::Error::SqliteFailure(err, msg) => {
                let message = msg.clone().unwrap_or_else(|| err.to_string());
                let code = match err.extended_code {
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        KnownErrorCode::UniqueConstraintViolation.as_str().to_string()
                    },
                    other => other.to_string(),
                };
                RawDatabaseError::new(message)
                    .with_code(code)
                    .with_meta("client", "rusqlite")
                    .with_meta("native_code", err.extended_code)
            },
            rusqlite::Error::QueryReturnedNoRows => {
                RawDatabaseError::new("Database record not found").with_meta("client", "rusqlite")
            },
            other => RawDatabaseError::new(other.to_string()).with_meta("client", "rusqlite"),
        }
    }

    fn is_not_found(&self) -> bool {
        matches!(self, rusqlite::Error::QueryReturnedNoRows)
    }
}

/// Map a database client error to an application-layer error
pub fn map_database_error<E: DatabaseClientError>(err: E) -> ApplicationError {
    let raw = err.to_raw_database_error();

    if raw.known_code().is_some() {
        debug!(code = ?raw.code, "Database unique constraint violation");
    } else if err.is_not_found() {
        debug!(error = %raw.message, "Database lookup matched no rows");
    } else {
        // Classification drops the code, so record it here.
        warn!(
            code = ?raw.code,
            native_code = ?raw.meta().get("native_code"),
            error = %raw.message,
            "Database error"
        );
    }

    classify(raw)
}

/// Map a sqlx error to an application-layer error
pub fn map_sqlx_error(e: sqlx::Error) -> ApplicationError {
    map_database_error(e)
}

/// Map a rusqlite error to an application-layer error
pub fn map_rusqlite_error(e: rusqlite::Error) -> ApplicationError {
    map_database_error(e)
}

/// Classify database client errors while propagating them with `?`
pub trait DatabaseResultExt<T> {
    /// Replace a client error with its application classification
    fn map_db_err(self) -> Result<T, ApplicationError>;
}

impl<T, E: DatabaseClientError> DatabaseResultExt<T> for Result<T, E> {
    fn map_db_err(self) -> Result<T, ApplicationError> {
        self.map_err(map_database_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::ApplicationErrorKind;

    fn sqlite_failure(extended_code: i32, msg: &str) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(extended_code), Some(msg.to_string()))
    }

    #[test]
    fn row_not_found_is_generic() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert_eq!(err, ApplicationError::database("Database record not found"));
    }

    #[test]
    fn pool_timeout_is_generic() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ApplicationErrorKind::DatabaseError);
    }

    #[test]
    fn sqlx_non_database_error_has_no_code() {
        let raw = sqlx::Error::PoolClosed.to_raw_database_error();
        assert_eq!(raw.code, None);
        assert_eq!(raw.meta()["client"], "sqlx");
    }

    #[test]
    fn rusqlite_unique_failure_is_unique_constraint() {
        let err = map_rusqlite_error(sqlite_failure(
            ffi::SQLITE_CONSTRAINT_UNIQUE,
            "UNIQUE constraint failed: users.email",
        ));

        let ApplicationError::UniqueConstraint { source } = err else {
            unreachable!("Expected UniqueConstraint");
        };
        assert_eq!(source.code.as_deref(), Some("P2002"));
        assert_eq!(source.message, "UNIQUE constraint failed: users.email");
        assert_eq!(source.meta()["native_code"], ffi::SQLITE_CONSTRAINT_UNIQUE);
    }

    #[test]
    fn rusqlite_primary_key_failure_is_unique_constraint() {
        let err = map_rusqlite_error(sqlite_failure(
            ffi::SQLITE_CONSTRAINT_PRIMARYKEY,
            "UNIQUE constraint failed: users.id",
        ));
        assert!(err.is_unique_constraint());
    }

    #[test]
    fn rusqlite_foreign_key_failure_is_generic() {
        let err = map_rusqlite_error(sqlite_failure(
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            "FOREIGN KEY constraint failed",
        ));
        assert_eq!(err, ApplicationError::database("FOREIGN KEY constraint failed"));
    }

    #[test]
    fn rusqlite_native_code_kept_on_raw_error() {
        let raw = sqlite_failure(ffi::SQLITE_CONSTRAINT_FOREIGNKEY, "fk").to_raw_database_error();
        assert_eq!(
            raw.code,
            Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY.to_string())
        );
    }

    #[test]
    fn rusqlite_no_rows_is_generic() {
        let err = map_rusqlite_error(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err, ApplicationError::database("Database record not found"));
    }

    #[test]
    fn no_row_errors_are_not_found() {
        assert!(sqlx::Error::RowNotFound.is_not_found());
        assert!(rusqlite::Error::QueryReturnedNoRows.is_not_found());
    }

    #[test]
    fn other_errors_are_not_not_found() {
        assert!(!sqlx::Error::PoolTimedOut.is_not_found());
        assert!(!sqlite_failure(ffi::SQLITE_CONSTRAINT_UNIQUE, "dup").is_not_found());
        assert!(!RawDatabaseError::new("Database record not found").is_not_found());
    }

    #[test]
    fn raw_error_passes_through() {
        let raw = RawDatabaseError::new("dup").with_code("P2002");
        assert_eq!(
            map_database_error(raw.clone()),
            ApplicationError::UniqueConstraint { source: raw }
        );
    }

    #[test]
    fn result_ext_maps_error() {
        let result: Result<(), rusqlite::Error> = Err(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(
            result.map_db_err(),
            Err(ApplicationError::Database { .. })
        ));
    }

    #[test]
    fn result_ext_keeps_ok() {
        let result: Result<u32, sqlx::Error> = Ok(7);
        assert_eq!(result.map_db_err(), Ok(7));
    }
}
