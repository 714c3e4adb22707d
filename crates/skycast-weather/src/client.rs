//! HTTP client for the weather provider.
//!
//! Two operations, one round trip each: current conditions and the hourly
//! forecast, both looked up by city name. No retry, no caching; non-success
//! statuses are categorized before any body parsing.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::WeatherError;
use crate::types::{CurrentConditions, ForecastResponse, Units};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LANGUAGE: &str = "en";

/// Weather provider API client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    base_url: Url,
    api_key: String,
    units: Units,
    language: String,
    http: Arc<Client>,
}

impl WeatherClient {
    /// Create a client for the given provider base URL and API key.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, WeatherError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| WeatherError::Unknown(format!("invalid base URL: {e}")))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| WeatherError::Network(e.to_string()))?;

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            units: Units::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            http: Arc::new(http),
        })
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Current conditions for a city, looked up by name.
    pub async fn get_current_weather(
        &self,
        city: &str,
    ) -> Result<CurrentConditions, WeatherError> {
        let conditions: CurrentConditions = self.get_json("weather", city).await?;
        tracing::debug!(
            city = %conditions.name,
            country = %conditions.sys.country,
            "fetched current conditions"
        );
        Ok(conditions)
    }

    /// Time-stamped forecast entries for a city, looked up by name.
    pub async fn get_hourly_forecast(&self, city: &str) -> Result<ForecastResponse, WeatherError> {
        let forecast: ForecastResponse = self.get_json("forecast", city).await?;
        tracing::debug!(
            city = %forecast.city.name,
            entries = forecast.list.len(),
            "fetched hourly forecast"
        );
        Ok(forecast)
    }

    fn endpoint(&self, leaf: &str) -> Result<Url, WeatherError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| WeatherError::Unknown("base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(leaf);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        leaf: &str,
        city: &str,
    ) -> Result<T, WeatherError> {
        let url = self.endpoint(leaf)?;

        let response = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_query()),
                ("lang", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(%status, body = %body, endpoint = leaf, "provider returned error status");
            return Err(WeatherError::from_status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WeatherError::Unknown(e.to_string()))
    }
}
