//! Core application wiring for Skycast
//!
//! Configuration, the top-level error type, and the composition root that
//! connects the weather client, the city store, and persistence.

pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{ApiConfig, Config, ValidationResult, ENV_API_BASE_URL, ENV_API_KEY};
pub use error::{AppError, ConfigError};

use anyhow::Result;

/// Initialize logging for the application.
///
/// Defaults to `warn` so normal command output stays clean; override with
/// `RUST_LOG`.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("skycast core initialized");
    Ok(())
}
