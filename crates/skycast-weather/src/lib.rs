//! Weather provider client for Skycast
//!
//! Provides current conditions and hourly forecasts by city name, with
//! failures categorized by HTTP status or transport error.

pub mod client;
pub mod error;
pub mod types;

pub use client::WeatherClient;
pub use error::WeatherError;
pub use types::{
    ConditionSummary, CurrentConditions, ForecastEntry, ForecastResponse, Units, HOURLY_WINDOW,
};
