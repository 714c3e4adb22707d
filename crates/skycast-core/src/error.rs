//! Top-level error types for the Skycast application.
//!
//! Typed errors preserve full context for logging; `user_message()` gives
//! the fixed string the front-end shows for each failure.

use thiserror::Error;

use skycast_weather::WeatherError;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Weather API error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// A message suitable for display, actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Weather(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file is malformed: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("no weather API key configured")]
    MissingApiKey,
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Parse(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::MissingApiKey => {
                "No weather API key configured. Set SKYCAST_API_KEY or add api_key to config.toml."
            }
        }
    }
}
