//! HTTP route handlers.

use std::collections::BTreeSet;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{Airport, AtmosphericRecord, Iata, Reading, WeatherError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/query/ping", get(query_ping))
        .route("/query/weather/:iata", get(query_weather))
        .route("/query/weather/:iata/:radius", get(query_weather_radius))
        .route("/collect/ping", get(collect_ping))
        .route("/collect/weather/:iata/:kind", post(update_weather))
        .route("/collect/airports", get(list_airports))
        .route(
            "/collect/airport/:iata",
            get(get_airport).delete(delete_airport),
        )
        .route("/collect/airport/:iata/:lat/:long", post(add_airport))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Collector liveness endpoint.
async fn collect_ping() -> &'static str {
    "ready"
}

/// Usage and freshness statistics.
async fn query_ping(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.weather.health_stats().into())
}

/// Weather at a single airport.
async fn query_weather(
    State(state): State<AppState>,
    Path(iata): Path<String>,
) -> Result<Json<Vec<AtmosphericRecord>>, AppError> {
    let iata = parse_iata(&iata)?;
    let records = state.weather.query_weather(&iata, None)?;
    Ok(Json(records))
}

/// Weather at every airport within a radius.
async fn query_weather_radius(
    State(state): State<AppState>,
    Path((iata, radius)): Path<(String, String)>,
) -> Result<Json<Vec<AtmosphericRecord>>, AppError> {
    let iata = parse_iata(&iata)?;
    let radius = parse_radius(&radius)?;
    let records = state.weather.query_weather(&iata, radius)?;
    Ok(Json(records))
}

/// Accept a reading from a collector.
///
/// Out-of-range readings are acknowledged like any other.
async fn update_weather(
    State(state): State<AppState>,
    Path((iata, kind)): Path<(String, String)>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let iata = parse_iata(&iata)?;
    // Parse JSON manually so we can log the body on failure
    let reading: Reading = serde_json::from_slice(&body).map_err(|e| {
        warn!(body = %String::from_utf8_lossy(&body), error = %e, "Invalid reading JSON");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    state.weather.submit_reading(&iata, &kind, reading)?;
    Ok(StatusCode::OK)
}

/// List every registered airport code.
async fn list_airports(State(state): State<AppState>) -> Json<BTreeSet<Iata>> {
    Json(state.weather.list_airports())
}

/// Look up one airport.
async fn get_airport(
    State(state): State<AppState>,
    Path(iata): Path<String>,
) -> Result<Json<Airport>, AppError> {
    let iata = parse_iata(&iata)?;
    state
        .weather
        .get_airport(&iata)
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Airport {iata} not found"),
        })
}

/// Register or move an airport.
async fn add_airport(
    State(state): State<AppState>,
    Path((iata, lat, long)): Path<(String, String, String)>,
) -> Result<Json<Airport>, AppError> {
    let iata = parse_iata(&iata)?;
    let latitude = parse_degrees(&lat, "latitude")?;
    let longitude = parse_degrees(&long, "longitude")?;
    Ok(Json(state.weather.register_airport(iata, latitude, longitude)))
}

/// Airport removal is not supported.
async fn delete_airport(
    State(state): State<AppState>,
    Path(iata): Path<String>,
) -> Result<StatusCode, AppError> {
    let iata = parse_iata(&iata)?;
    state.weather.remove_airport(&iata)?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_iata(raw: &str) -> Result<Iata, AppError> {
    Iata::parse_normalized(raw).map_err(|e| AppError::BadRequest {
        message: format!("Invalid IATA code {raw:?}: {e}"),
    })
}

/// An empty radius means "this airport only".
fn parse_radius(raw: &str) -> Result<Option<f64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    match raw.parse::<f64>() {
        Ok(radius) if radius.is_finite() && radius >= 0.0 => Ok(Some(radius)),
        _ => Err(AppError::BadRequest {
            message: format!("Invalid radius: {raw}"),
        }),
    }
}

fn parse_degrees(raw: &str, what: &str) -> Result<f64, AppError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AppError::BadRequest {
            message: format!("Invalid {what}: {raw}"),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    NotImplemented { message: String },
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        let message = e.to_string();
        match e {
            WeatherError::NoSuchAirport(_) => AppError::NotFound { message },
            WeatherError::UnknownMeasurementKind(_) => AppError::Unprocessable { message },
            WeatherError::NotImplemented(_) => AppError::NotImplemented { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::NotImplemented { message } => (StatusCode::NOT_IMPLEMENTED, message),
        };

        warn!(status = %status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
