//! Human-friendly output formatting.

use chrono::DateTime;

pub fn format_temperature(temp: f64) -> String {
    format!("{}°C", temp.round() as i64)
}

pub fn format_feels_like(feels_like: f64) -> String {
    format!("Feels like {}°C", feels_like.round() as i64)
}

/// Observation time as a UTC timestamp, or "unknown" for out-of-range values.
pub fn format_observed(dt: i64) -> String {
    DateTime::from_timestamp(dt, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn format_hour(dt: i64) -> String {
    DateTime::from_timestamp(dt, 0)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
