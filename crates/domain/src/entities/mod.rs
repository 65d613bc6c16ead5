//! Domain entities

mod raw_database_error;

pub use raw_database_error::RawDatabaseError;
