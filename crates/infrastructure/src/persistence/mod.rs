//! Persistence module
//!
//! Error translation for the sqlx and rusqlite SQLite clients.

pub mod error;

pub use error::{
    DatabaseClientError, DatabaseResultExt, map_database_error, map_rusqlite_error,
    map_sqlx_error,
};
