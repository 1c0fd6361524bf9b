use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use weather_core::{CityCandidate, ProxyError, WeatherProvider, WeatherQuery, WeatherRequest, service};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

/// JSON API mounted under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/cities", get(search_cities))
        .route("/api/weather", post(get_weather))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CitiesParams {
    #[serde(default)]
    q: String,
}

/// Error body `{"error": message}` with the matching status code.
#[derive(Debug)]
pub struct ApiError(ProxyError);

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

async fn search_cities(
    State(state): State<AppState>,
    params: Result<Query<CitiesParams>, QueryRejection>,
) -> Json<Vec<CityCandidate>> {
    let query = params.map(|Query(p)| p.q).unwrap_or_default();
    Json(service::search_cities(state.provider.as_ref(), &query).await)
}

async fn get_weather(
    State(state): State<AppState>,
    payload: Result<Json<WeatherQuery>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(query) = payload.map_err(|rejection| {
        ProxyError::validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let request = WeatherRequest::from(query);
    tracing::info!(?request, "weather request");

    let value = service::get_weather(state.provider.as_ref(), request).await?;
    Ok(Json(value))
}
