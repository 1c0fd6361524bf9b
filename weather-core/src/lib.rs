//! Core library for the weather planner proxy.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over the upstream weather provider
//! - Shared domain models (city candidates, forecast requests)
//! - City lookup and forecast retrieval
//!
//! It is used by `weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod service;

pub use config::{Config, FileConfig};
pub use error::ProxyError;
pub use model::{
    CityCandidate, CityInfo, CityWeather, Coordinates, ForecastResult, GeoRecord, WeatherQuery,
    WeatherRequest,
};
pub use provider::{WeatherProvider, provider_from_config};
