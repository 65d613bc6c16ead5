//! Telemetry and structured logging infrastructure

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
