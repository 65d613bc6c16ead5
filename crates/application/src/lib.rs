//! Application layer - Database error classification
//!
//! Defines the application error taxonomy and the classifier that translates
//! raw database errors into it. Infrastructure adapters feed raw errors from
//! concrete database clients into [`classify`].

pub mod error;
pub mod error_classifier;

pub use error::{ApplicationError, ApplicationErrorKind};
pub use error_classifier::{classify, classify_ref};
