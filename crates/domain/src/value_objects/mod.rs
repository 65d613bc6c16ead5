//! Value Objects - Immutable, identity-less domain primitives

mod known_error_code;

pub use known_error_code::KnownErrorCode;
