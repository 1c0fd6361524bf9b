//! City lookup and forecast retrieval on top of a [`WeatherProvider`].

use chrono::NaiveDate;

use crate::{
    error::ProxyError,
    model::{CityCandidate, CityInfo, CityWeather, Coordinates, ForecastResult, WeatherRequest},
    provider::WeatherProvider,
};

/// Queries shorter than this never reach the upstream.
pub const MIN_QUERY_CHARS: usize = 3;

/// Maximum number of candidates requested per lookup.
pub const CITY_SEARCH_LIMIT: u8 = 5;

const COORDINATES_REQUIRED: &str = "Location coordinates required";
const WEATHER_UNAVAILABLE: &str = "Weather data not available";
const GEOCODING_UNAVAILABLE: &str = "City lookup not available";

/// Look up cities matching a partial name.
///
/// Never fails: short queries and upstream failures both yield an empty list.
pub async fn search_cities(provider: &dyn WeatherProvider, query: &str) -> Vec<CityCandidate> {
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    match provider.geocode(query, CITY_SEARCH_LIMIT).await {
        Ok(records) => records.into_iter().map(CityCandidate::from).collect(),
        Err(e) => {
            tracing::warn!(query, error = %format!("{e:#}"), "city lookup failed, returning no matches");
            Vec::new()
        }
    }
}

/// Forecast for explicit coordinates. Absent or zero values are rejected.
pub async fn weather_by_coords(
    provider: &dyn WeatherProvider,
    lat: Option<f64>,
    lon: Option<f64>,
) -> Result<ForecastResult, ProxyError> {
    let coords = match (lat.filter(is_truthy), lon.filter(is_truthy)) {
        (Some(lat), Some(lon)) => Coordinates { lat, lon },
        _ => return Err(ProxyError::validation(COORDINATES_REQUIRED)),
    };

    fetch_forecast(provider, coords).await
}

/// Forecast for the best geocoding match of `city`, annotated with that match.
///
/// `start_date` does not narrow the forecast; the full payload is returned.
pub async fn weather_by_city(
    provider: &dyn WeatherProvider,
    city: &str,
    start_date: Option<NaiveDate>,
) -> Result<CityWeather, ProxyError> {
    tracing::debug!(city, ?start_date, "resolving city for forecast");

    let records = provider.geocode(city, 1).await.map_err(|e| {
        tracing::warn!(city, error = %format!("{e:#}"), "geocoding failed");
        ProxyError::upstream(GEOCODING_UNAVAILABLE)
    })?;

    let record = records
        .into_iter()
        .next()
        .ok_or_else(|| ProxyError::not_found(format!("City not found: {city}")))?;

    let weather = fetch_forecast(provider, Coordinates::from(&record)).await?;

    Ok(CityWeather {
        weather,
        city: CityInfo::from(&record),
    })
}

/// Dispatch a unified weather request; the city form is wrapped with its
/// resolved city, the coordinate form is returned as-is.
pub async fn get_weather(
    provider: &dyn WeatherProvider,
    request: WeatherRequest,
) -> Result<serde_json::Value, ProxyError> {
    match request {
        WeatherRequest::ByCoordinates { lat, lon } => weather_by_coords(provider, lat, lon).await,
        WeatherRequest::ByCity { city, start_date } => {
            let result = weather_by_city(provider, &city, start_date).await?;
            serde_json::to_value(result).map_err(|e| {
                tracing::warn!(error = %e, "failed to encode forecast");
                ProxyError::upstream(WEATHER_UNAVAILABLE)
            })
        }
    }
}

async fn fetch_forecast(
    provider: &dyn WeatherProvider,
    coords: Coordinates,
) -> Result<ForecastResult, ProxyError> {
    provider.forecast(coords).await.map_err(|e| {
        tracing::warn!(lat = coords.lat, lon = coords.lon, error = %format!("{e:#}"), "forecast failed");
        ProxyError::upstream(WEATHER_UNAVAILABLE)
    })
}

fn is_truthy(value: &f64) -> bool {
    *value != 0.0
}
