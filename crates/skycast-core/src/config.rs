use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use skycast_weather::Units;

/// Environment override for the provider base URL.
pub const ENV_API_BASE_URL: &str = "SKYCAST_API_BASE_URL";
/// Environment override for the provider API key.
pub const ENV_API_KEY: &str = "SKYCAST_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const APP_DIR: &str = "skycast";

/// A single configuration problem, tied to the field that caused it.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation: errors block startup, warnings do not.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory; the city storage slot lives here.
    pub config_dir: PathBuf,

    /// Weather provider settings
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the weather provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Provider API key. No fallback: requests fail without one.
    pub api_key: Option<String>,

    /// Unit system sent to the provider
    #[serde(default)]
    pub units: Units,

    /// Response language sent to the provider
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            units: Units::default(),
            language: default_language(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);

        Self {
            config_dir,
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating the default if it doesn't
    /// exist, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            let config = Self::default();
            config.save()?;
            config
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration and validate it, failing on validation errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_API_BASE_URL).ok(),
            std::env::var(ENV_API_KEY).ok(),
        );
    }

    fn apply_overrides(&mut self, base_url: Option<String>, api_key: Option<String>) {
        if let Some(base_url) = base_url.filter(|v| !v.is_empty()) {
            self.api.base_url = base_url;
        }
        if let Some(api_key) = api_key.filter(|v| !v.is_empty()) {
            self.api.api_key = Some(api_key);
        }
    }

    /// Validate the configuration, collecting errors and warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        match Url::parse(&self.api.base_url) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        "api.base_url",
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }
                if url.host().is_none() {
                    result.add_error("api.base_url", "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error("api.base_url", format!("Invalid URL: {e}"));
            }
        }

        if self.api.api_key.as_deref().unwrap_or_default().is_empty() {
            result.add_warning(
                "api.api_key",
                format!("No API key configured - weather requests will fail (set {ENV_API_KEY})"),
            );
        }

        if self.api.language.is_empty() {
            result.add_error("api.language", "Language must not be empty");
        }

        result
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// The storage slot holding the serialized city list.
    pub fn cities_path(&self) -> PathBuf {
        self.config_dir.join("cities.json")
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }
}
