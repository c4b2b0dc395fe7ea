//! Shared application configuration for the miamlo discovery client.

pub mod app_config;
pub mod config;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

/// Errors produced while loading application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable was not set.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable was set but could not be parsed.
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
