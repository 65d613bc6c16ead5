//! Infrastructure layer - Adapters for database clients
//!
//! Turns errors from concrete database clients (sqlx, rusqlite) into raw
//! database errors and classifies them. Also hosts configuration loading and
//! logging setup.

pub mod config;
pub mod persistence;
pub mod telemetry;

pub use config::{AppConfig, Environment};
pub use persistence::{
    DatabaseClientError, DatabaseResultExt, map_database_error, map_rusqlite_error,
    map_sqlx_error,
};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
