use crate::{
    Config,
    model::{Coordinates, ForecastResult, GeoRecord},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Upstream geocoding and forecast endpoints.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a free-form place name into at most `limit` matches.
    async fn geocode(&self, query: &str, limit: u8) -> anyhow::Result<Vec<GeoRecord>>;

    /// Fetch the multi-day forecast (metric units) for a location.
    async fn forecast(&self, coords: Coordinates) -> anyhow::Result<ForecastResult>;
}

/// Construct the provider used by the server from the startup config.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    Arc::new(OpenWeatherProvider::new(
        config.api_key.clone(),
        config.base_url.clone(),
    ))
}
