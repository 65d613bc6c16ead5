//! Application configuration
//!
//! Loaded from built-in defaults, an optional `config.toml`, and
//! `DBERR__`-prefixed environment variables (e.g. `DBERR__TELEMETRY__JSON=true`).

use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};
use tracing::debug;

use crate::telemetry::TelemetryConfig;

/// Prefix for environment variable overrides
const ENV_PREFIX: &str = "DBERR";

/// Environment variable source, e.g. `DBERR__TELEMETRY__LOG_FILTER=debug`
fn env_source() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Application environment (development or production)
///
/// Controls how much error detail is exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Environment {
    /// Development environment - error details are exposed
    #[default]
    Development,
    /// Production environment - error details are hidden
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development or production)
    #[serde(default)]
    pub environment: Option<Environment>,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(
            config::File::with_name("config").required(false),
            env_source(),
        )
    }

    /// Load configuration from a specific file, then apply environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration file");
        Self::build(config::File::from(path), env_source())
    }

    fn build<S>(file: S, env: config::Environment) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            .set_default("environment", Environment::default().to_string())?
            .add_source(file)
            .add_source(env);

        builder.build()?.try_deserialize()
    }

    /// The configured environment, defaulting to development
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    /// Whether internal error details may be returned to clients
    #[must_use]
    pub fn expose_error_details(&self) -> bool {
        self.environment() != Environment::Production
    }
}
