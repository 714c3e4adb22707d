//! Categorized failures for weather provider calls.
//!
//! Every HTTP status or transport failure collapses into one of a small
//! set of categories, each with a fixed message suitable for display.

use reqwest::StatusCode;
use thiserror::Error;

/// Weather provider errors, categorized by HTTP status or transport failure.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("city not recognized by the weather provider")]
    NotFound,

    #[error("weather provider rejected the request as invalid")]
    BadRequest,

    #[error("weather provider rate limit exceeded")]
    RateLimited,

    #[error("weather provider unavailable (status {status})")]
    ServiceUnavailable { status: u16 },

    #[error("network failure: {0}")]
    Network(String),

    #[error("unexpected weather provider response: {0}")]
    Unknown(String),
}

impl WeatherError {
    /// Categorize a non-success HTTP status from the provider.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            404 => WeatherError::NotFound,
            400 => WeatherError::BadRequest,
            429 => WeatherError::RateLimited,
            s if s >= 500 => WeatherError::ServiceUnavailable { status: s },
            s => WeatherError::Unknown(format!("unexpected status {s}")),
        }
    }

    /// Message shown next to the add-city form.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::NotFound => "City not found. Please check the city name and try again.",
            WeatherError::BadRequest => "Invalid city name. Please enter a valid city name.",
            WeatherError::RateLimited => "Too many requests. Please wait a moment and try again.",
            WeatherError::ServiceUnavailable { .. } => {
                "Weather service is temporarily unavailable. Please try again later."
            }
            WeatherError::Network(_) => "Network error. Please check your internet connection.",
            WeatherError::Unknown(_) => "Failed to fetch weather data. Please try again.",
        }
    }

    /// Message shown in the city detail view when the hourly forecast fails.
    ///
    /// The detail view words a 404 differently from the add form: the city is
    /// already tracked, only its forecast is missing.
    pub fn forecast_user_message(&self) -> &'static str {
        match self {
            WeatherError::NotFound => "Hourly forecast not available for this city.",
            WeatherError::RateLimited => "Too many requests. Please wait a moment and try again.",
            WeatherError::ServiceUnavailable { .. } => {
                "Weather service is temporarily unavailable. Please try again later."
            }
            WeatherError::Network(_) => "Network error. Please check your internet connection.",
            _ => "Error loading forecast",
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            WeatherError::Unknown(err.to_string())
        } else if let Some(status) = err.status() {
            WeatherError::from_status(status)
        } else {
            // Timeouts, connection resets, DNS failures: no response at all.
            WeatherError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn status_404_maps_to_not_found() {
        assert!(matches!(
            WeatherError::from_status(StatusCode::NOT_FOUND),
            WeatherError::NotFound
        ));
    }

    #[test]
    fn status_400_maps_to_bad_request() {
        assert!(matches!(
            WeatherError::from_status(StatusCode::BAD_REQUEST),
            WeatherError::BadRequest
        ));
    }

    #[test]
    fn status_429_maps_to_rate_limited() {
        assert!(matches!(
            WeatherError::from_status(StatusCode::TOO_MANY_REQUESTS),
            WeatherError::RateLimited
        ));
    }

    #[test]
    fn status_5xx_maps_to_service_unavailable() {
        for code in [500u16, 502, 503, 504] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(matches!(
                WeatherError::from_status(status),
                WeatherError::ServiceUnavailable { status } if status == code
            ));
        }
    }

    #[test]
    fn unmapped_status_is_unknown() {
        assert!(matches!(
            WeatherError::from_status(StatusCode::UNAUTHORIZED),
            WeatherError::Unknown(_)
        ));
    }

    #[test]
    fn not_found_user_message_mentions_city() {
        let msg = WeatherError::NotFound.user_message();
        assert!(msg.contains("City not found"));
    }

    #[test]
    fn forecast_message_differs_for_not_found() {
        let msg = WeatherError::NotFound.forecast_user_message();
        assert!(msg.contains("Hourly forecast"));
        assert_ne!(msg, WeatherError::NotFound.user_message());
    }

    #[test]
    fn forecast_message_falls_back_for_bad_request() {
        assert_eq!(
            WeatherError::BadRequest.forecast_user_message(),
            "Error loading forecast"
        );
    }
}
