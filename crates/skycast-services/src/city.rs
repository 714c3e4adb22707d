//! Tracked city records.

use serde::{Deserialize, Serialize};
use skycast_weather::CurrentConditions;

/// A tracked city: identity plus the last fetched snapshot, if any.
///
/// The whole record is persisted; the snapshot keeps the provider's shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub weather: Option<CurrentConditions>,
}

impl City {
    /// Identity is `name-country` from the provider's normalized response,
    /// so the same city resolved twice always collides.
    pub fn derive_id(name: &str, country: &str) -> String {
        format!("{name}-{country}")
    }

    /// Build a city from a freshly fetched snapshot.
    pub fn from_conditions(conditions: CurrentConditions) -> Self {
        Self {
            id: Self::derive_id(&conditions.name, &conditions.sys.country),
            name: conditions.name.clone(),
            country: conditions.sys.country.clone(),
            weather: Some(conditions),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn kyiv_conditions() -> CurrentConditions {
        serde_json::from_value(serde_json::json!({
            "name": "Kyiv",
            "dt": 1717000000,
            "main": {"temp": 18.3, "feels_like": 17.1, "pressure": 1012, "humidity": 56},
            "wind": {"speed": 4.2},
            "weather": [{"description": "scattered clouds", "icon": "03d"}],
            "sys": {"country": "UA"}
        }))
        .unwrap()
    }

    #[test]
    fn id_is_name_dash_country() {
        assert_eq!(City::derive_id("Kyiv", "UA"), "Kyiv-UA");
    }

    #[test]
    fn from_conditions_derives_identity() {
        let city = City::from_conditions(kyiv_conditions());
        assert_eq!(city.id, "Kyiv-UA");
        assert_eq!(city.name, "Kyiv");
        assert_eq!(city.country, "UA");
        assert!(city.weather.is_some());
    }

    #[test]
    fn city_without_weather_deserializes() {
        let city: City = serde_json::from_str(
            r#"{"id": "Kyiv-UA", "name": "Kyiv", "country": "UA"}"#,
        )
        .unwrap();
        assert!(city.weather.is_none());
    }
}
