use std::sync::Arc;

use skycast_services::{CityStorage, CityStore};
use skycast_weather::WeatherClient;

use crate::error::{AppError, ConfigError};
use crate::Config;

/// Composition root: wires config, the weather client, the city store,
/// and the persistence bridge.
pub struct App {
    config: Arc<Config>,
    client: WeatherClient,
    store: Arc<CityStore>,
}

impl App {
    /// Create an application from the on-disk configuration.
    pub fn new() -> Result<Self, AppError> {
        let (config, _) = Config::load_validated()?;
        Self::with_config(config)
    }

    /// Create an application from an explicit configuration.
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let api_key = config
            .api
            .api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey)?;

        let client = WeatherClient::new(&config.api.base_url, api_key)?
            .with_units(config.api.units)
            .with_language(config.api.language.clone());

        let store = Arc::new(CityStore::new(client.clone()));

        let storage = CityStorage::new(config.cities_path());
        let stored = storage.load();
        if !stored.is_empty() {
            tracing::info!(count = stored.len(), "hydrated city list from storage");
            store.set_cities(stored);
        }
        // Subscribe after hydration: loading the list back must not
        // immediately rewrite the slot.
        store.subscribe(move |cities| storage.save(cities));

        Ok(Self {
            config: Arc::new(config),
            client,
            store,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The weather client, for callers that fetch outside the store
    /// (the detail view's hourly forecast).
    pub fn client(&self) -> &WeatherClient {
        &self.client
    }

    pub fn store(&self) -> Arc<CityStore> {
        self.store.clone()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use skycast_services::City;
    use tempfile::tempdir;

    fn test_config(config_dir: std::path::PathBuf) -> Config {
        let mut config = Config {
            config_dir,
            ..Config::default()
        };
        config.api.base_url = "http://127.0.0.1:9".to_string();
        config.api.api_key = Some("test-key".to_string());
        config
    }

    fn city(name: &str, country: &str) -> City {
        City {
            id: City::derive_id(name, country),
            name: name.to_string(),
            country: country.to_string(),
            weather: None,
        }
    }

    #[test]
    fn with_config_requires_api_key() {
        let dir = tempdir().unwrap();
        let mut config = test_config(dir.path().to_path_buf());
        config.api.api_key = None;

        let err = App::with_config(config).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::MissingApiKey)));
        assert!(err.user_message().contains("SKYCAST_API_KEY"));
    }

    #[test]
    fn store_starts_empty_without_persisted_state() {
        let dir = tempdir().unwrap();
        let app = App::with_config(test_config(dir.path().to_path_buf())).unwrap();
        assert!(app.store().cities().is_empty());
    }

    #[test]
    fn mutations_are_persisted_and_hydrated_on_restart() {
        let dir = tempdir().unwrap();

        let app = App::with_config(test_config(dir.path().to_path_buf())).unwrap();
        app.store().add_city(city("Kyiv", "UA"));
        app.store().add_city(city("Lviv", "UA"));
        app.store().remove_city("Lviv-UA");

        // A fresh composition over the same config dir sees the survivors.
        let restarted = App::with_config(test_config(dir.path().to_path_buf())).unwrap();
        let cities = restarted.store().cities();
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].id, "Kyiv-UA");
    }

    #[test]
    fn clear_all_persists_the_empty_list() {
        let dir = tempdir().unwrap();

        let app = App::with_config(test_config(dir.path().to_path_buf())).unwrap();
        app.store().add_city(city("Kyiv", "UA"));
        app.store().clear_all_cities();

        let restarted = App::with_config(test_config(dir.path().to_path_buf())).unwrap();
        assert!(restarted.store().cities().is_empty());
    }
}
