use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One record of the upstream geocoding response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoRecord {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

/// A geocoded match for a city-name query, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityCandidate {
    pub name: String,
    pub state: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub display: String,
}

impl CityCandidate {
    /// "name, state, country", or "name, country" when the state is empty.
    pub fn display_name(name: &str, state: &str, country: &str) -> String {
        if state.is_empty() {
            format!("{name}, {country}")
        } else {
            format!("{name}, {state}, {country}")
        }
    }
}

impl From<GeoRecord> for CityCandidate {
    fn from(record: GeoRecord) -> Self {
        let display = Self::display_name(&record.name, &record.state, &record.country);
        Self {
            name: record.name,
            state: record.state,
            country: record.country,
            lat: record.lat,
            lon: record.lon,
            display,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl From<&GeoRecord> for Coordinates {
    fn from(record: &GeoRecord) -> Self {
        Self {
            lat: record.lat,
            lon: record.lon,
        }
    }
}

/// Provider-defined forecast payload, passed through untouched.
pub type ForecastResult = Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    pub name: String,
    pub country: String,
    pub state: String,
}

impl From<&GeoRecord> for CityInfo {
    fn from(record: &GeoRecord) -> Self {
        Self {
            name: record.name.clone(),
            country: record.country.clone(),
            state: record.state.clone(),
        }
    }
}

/// Forecast annotated with the city it was resolved from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWeather {
    pub weather: ForecastResult,
    pub city: CityInfo,
}

/// Body of `POST /api/weather`. A non-empty `city` selects the lookup by
/// name; otherwise `lat`/`lon` are used.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub city: Option<String>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WeatherRequest {
    ByCoordinates {
        lat: Option<f64>,
        lon: Option<f64>,
    },
    ByCity {
        city: String,
        start_date: Option<NaiveDate>,
    },
}

impl From<WeatherQuery> for WeatherRequest {
    fn from(query: WeatherQuery) -> Self {
        match query.city.filter(|c| !c.trim().is_empty()) {
            Some(city) => WeatherRequest::ByCity {
                city,
                start_date: query.start_date,
            },
            None => WeatherRequest::ByCoordinates {
                lat: query.lat,
                lon: query.lon,
            },
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_includes_state_when_present() {
        let record: GeoRecord = serde_json::from_value(json!({
            "name": "Portland", "state": "Oregon", "country": "US", "lat": 45.5, "lon": -122.6
        }))
        .unwrap();

        let city = CityCandidate::from(record);
        assert_eq!(city.display, "Portland, Oregon, US");
        assert_eq!(city.state, "Oregon");
    }

    #[test]
    fn missing_or_null_state_defaults_to_empty() {
        let missing: GeoRecord = serde_json::from_value(json!({
            "name": "Paris", "country": "FR", "lat": 48.85, "lon": 2.35
        }))
        .unwrap();
        let null: GeoRecord = serde_json::from_value(json!({
            "name": "Paris", "state": null, "country": "FR", "lat": 48.85, "lon": 2.35
        }))
        .unwrap();

        assert_eq!(missing, null);
        assert_eq!(CityCandidate::from(missing).display, "Paris, FR");
    }

    #[test]
    fn extra_upstream_fields_are_ignored() {
        let record: GeoRecord = serde_json::from_value(json!({
            "name": "London", "local_names": {"en": "London"},
            "country": "GB", "lat": 51.5, "lon": -0.12
        }))
        .unwrap();
        assert_eq!(record.name, "London");
    }

    #[test]
    fn candidate_serializes_all_fields() {
        let city = CityCandidate::from(GeoRecord {
            name: "Berlin".into(),
            state: String::new(),
            country: "DE".into(),
            lat: 52.52,
            lon: 13.4,
        });

        let value = serde_json::to_value(&city).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Berlin", "state": "", "country": "DE",
                "lat": 52.52, "lon": 13.4, "display": "Berlin, DE"
            })
        );
    }

    #[test]
    fn query_with_city_selects_city_lookup() {
        let query: WeatherQuery = serde_json::from_value(json!({
            "city": "Lisbon", "startDate": "2026-10-20"
        }))
        .unwrap();

        assert_eq!(
            WeatherRequest::from(query),
            WeatherRequest::ByCity {
                city: "Lisbon".into(),
                start_date: NaiveDate::from_ymd_opt(2026, 10, 20),
            }
        );
    }

    #[test]
    fn query_without_city_selects_coordinates() {
        let query: WeatherQuery = serde_json::from_value(json!({"lat": 1.5, "city": " "})).unwrap();

        assert_eq!(
            WeatherRequest::from(query),
            WeatherRequest::ByCoordinates {
                lat: Some(1.5),
                lon: None
            }
        );
    }

    #[test]
    fn malformed_start_date_is_rejected() {
        let result: Result<WeatherQuery, _> =
            serde_json::from_value(json!({"city": "Lisbon", "startDate": "next week"}));
        assert!(result.is_err());
    }
}
