//! Domain layer for database error classification
//!
//! Contains the raw database error entity, the closed set of recognized
//! database error codes, and domain errors. This layer has no knowledge of
//! any concrete database client.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
