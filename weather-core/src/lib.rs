//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather current-conditions client
//! - Shared domain models (queries, responses, condition classification)
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::{Config, OpenWeatherConfig};
pub use error::WeatherError;
pub use model::{
    Condition, ConditionKind, Coordinates, CurrentWeather, Measurements, Reading, Units,
    WeatherQuery,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
