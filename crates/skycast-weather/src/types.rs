//! Provider-shaped response types.
//!
//! These structs follow the OpenWeather JSON layout field for field, since
//! the snapshot is persisted and replaced wholesale rather than remapped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many forecast entries the detail view consumes.
pub const HOURLY_WINDOW: usize = 24;

/// Unit system passed to the provider as the `units` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Standard,
}

impl Units {
    pub fn as_query(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
            Units::Standard => "standard",
        }
    }
}

/// Temperature block shared by current conditions and forecast entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainMetrics {
    pub temp: f64,
    pub feels_like: f64,
    pub pressure: u32,
    pub humidity: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// One entry of the provider's `weather` array: a description plus icon code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sys {
    pub country: String,
}

/// Current conditions for one city, as returned by `GET /weather`.
///
/// This is the snapshot stored per tracked city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    pub dt: i64,
    pub main: MainMetrics,
    pub wind: Wind,
    #[serde(default)]
    pub visibility: Option<u32>,
    #[serde(default)]
    pub weather: Vec<ConditionSummary>,
    pub sys: Sys,
}

impl CurrentConditions {
    /// The leading condition entry, if the provider sent any.
    pub fn condition(&self) -> Option<&ConditionSummary> {
        self.weather.first()
    }

    /// Observation time, when `dt` is a representable unix timestamp.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastCity {
    pub name: String,
    pub country: String,
}

/// One time-stamped forecast entry from `GET /forecast`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: MainMetrics,
    #[serde(default)]
    pub weather: Vec<ConditionSummary>,
}

impl ForecastEntry {
    pub fn condition(&self) -> Option<&ConditionSummary> {
        self.weather.first()
    }
}

/// Full forecast response, a list of time-stamped entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub city: ForecastCity,
    pub list: Vec<ForecastEntry>,
}

impl ForecastResponse {
    /// The leading `n` entries, fewer when the provider sent fewer.
    pub fn leading(&self, n: usize) -> &[ForecastEntry] {
        &self.list[..self.list.len().min(n)]
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn current_conditions_deserialization() {
        let json = r#"{
            "name": "Kyiv",
            "dt": 1717000000,
            "main": {"temp": 18.3, "feels_like": 17.1, "pressure": 1012, "humidity": 56},
            "wind": {"speed": 4.2},
            "visibility": 10000,
            "weather": [{"description": "scattered clouds", "icon": "03d"}],
            "sys": {"country": "UA"}
        }"#;
        let conditions: CurrentConditions = serde_json::from_str(json).unwrap();
        assert_eq!(conditions.name, "Kyiv");
        assert_eq!(conditions.sys.country, "UA");
        assert_eq!(conditions.main.humidity, 56);
        assert_eq!(conditions.visibility, Some(10000));
        assert_eq!(conditions.condition().unwrap().description, "scattered clouds");
    }

    #[test]
    fn missing_weather_array_tolerated() {
        let json = r#"{
            "name": "Kyiv",
            "dt": 1717000000,
            "main": {"temp": 18.3, "feels_like": 17.1, "pressure": 1012, "humidity": 56},
            "wind": {"speed": 4.2},
            "sys": {"country": "UA"}
        }"#;
        let conditions: CurrentConditions = serde_json::from_str(json).unwrap();
        assert!(conditions.condition().is_none());
        assert!(conditions.visibility.is_none());
    }

    #[test]
    fn observed_at_converts_unix_seconds() {
        let json = r#"{
            "name": "Kyiv",
            "dt": 0,
            "main": {"temp": 0.0, "feels_like": 0.0, "pressure": 1000, "humidity": 50},
            "wind": {"speed": 0.0},
            "sys": {"country": "UA"}
        }"#;
        let conditions: CurrentConditions = serde_json::from_str(json).unwrap();
        let observed = conditions.observed_at().unwrap();
        assert_eq!(observed.timestamp(), 0);
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        // Snapshots are persisted verbatim, so serialization must keep the
        // provider field names.
        let json = r#"{
            "name": "Lviv",
            "dt": 1717000000,
            "main": {"temp": 21.0, "feels_like": 20.4, "pressure": 1018, "humidity": 40},
            "wind": {"speed": 2.0},
            "weather": [{"description": "clear sky", "icon": "01d"}],
            "sys": {"country": "UA"}
        }"#;
        let conditions: CurrentConditions = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&conditions).unwrap();
        assert!(out.contains("\"feels_like\":20.4"));
        assert!(out.contains("\"country\":\"UA\""));
    }

    #[test]
    fn forecast_leading_caps_at_available_entries() {
        let entry = r#"{"dt": 1, "main": {"temp": 1.0, "feels_like": 1.0, "pressure": 1000, "humidity": 10}}"#;
        let json = format!(
            r#"{{"city": {{"name": "Kyiv", "country": "UA"}}, "list": [{entry}, {entry}, {entry}]}}"#
        );
        let forecast: ForecastResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(forecast.leading(2).len(), 2);
        assert_eq!(forecast.leading(HOURLY_WINDOW).len(), 3);
    }

    #[test]
    fn units_query_values() {
        assert_eq!(Units::Metric.as_query(), "metric");
        assert_eq!(Units::Imperial.as_query(), "imperial");
        assert_eq!(Units::default(), Units::Metric);
    }
}
