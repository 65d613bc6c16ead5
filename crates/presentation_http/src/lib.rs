//! HTTP presentation layer
//!
//! Translates classified application errors into HTTP responses.

pub mod error;

pub use error::{ApiError, ErrorResponse, configure_error_exposure, set_expose_internal_errors};
