// HTTP request handlers
use crate::application::analysis_service::AnalysisReport;
use crate::domain::error::AnalysisError;
use crate::domain::forecast::Forecast;
use crate::domain::reading::Reading;
use crate::infrastructure::event_stream::sse_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

const DEFAULT_TAIL: usize = 5;

/// Manually entered metric values; values are clamped to the percent scale
/// before they reach the core.
#[derive(Debug, Deserialize)]
pub struct MetricInput {
    pub co2: f64,
    pub methane: f64,
    pub other_ghgs: f64,
    pub energy_intensity: f64,
}

impl MetricInput {
    fn into_reading(self) -> Result<Reading, &'static str> {
        let values = [self.co2, self.methane, self.other_ghgs, self.energy_intensity];
        if values.iter().any(|v| !v.is_finite()) {
            return Err("metric values must be finite numbers");
        }
        Ok(Reading::new(
            Utc::now(),
            self.co2.clamp(0.0, 100.0),
            self.methane.clamp(0.0, 100.0),
            self.other_ghgs.clamp(0.0, 100.0),
            self.energy_intensity.clamp(0.0, 100.0),
        ))
    }
}

#[derive(Deserialize)]
pub struct SeedQuery {
    pub seed: Option<u64>,
}

#[derive(Deserialize)]
pub struct TailQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct WindowQuery {
    pub window: Option<usize>,
}

#[derive(Deserialize)]
pub struct ForecastQuery {
    pub horizon: Option<usize>,
    pub seed: Option<u64>,
}

/// Analysis outcome; a young series is a normal informational case, not an
/// HTTP error.
#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResponse {
    Ready(AnalysisReport),
    InsufficientData { message: String },
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Currently displayed values; null until any data exists
pub async fn get_current(State(state): State<Arc<AppState>>) -> Json<Option<Reading>> {
    Json(state.monitoring_service.current().await)
}

/// Manually set the displayed values (not appended to the history)
pub async fn put_current(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MetricInput>,
) -> impl IntoResponse {
    match input.into_reading() {
        Ok(reading) => {
            state.monitoring_service.set_current(reading.clone()).await;
            Json(reading).into_response()
        }
        Err(message) => (StatusCode::UNPROCESSABLE_ENTITY, message).into_response(),
    }
}

/// Generate a random reading and make it current (not appended)
pub async fn post_sample(
    Query(query): Query<SeedQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Reading> {
    Json(state.monitoring_service.generate_sample(query.seed).await)
}

/// Append a reading to the series
pub async fn post_reading(
    State(state): State<Arc<AppState>>,
    Json(input): Json<MetricInput>,
) -> impl IntoResponse {
    match input.into_reading() {
        Ok(reading) => {
            state.monitoring_service.append_reading(reading.clone()).await;
            (StatusCode::CREATED, Json(reading)).into_response()
        }
        Err(message) => (StatusCode::UNPROCESSABLE_ENTITY, message).into_response(),
    }
}

/// Last readings of the series, oldest first
pub async fn list_readings(
    Query(query): Query<TailQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Reading>> {
    let limit = query.limit.unwrap_or(DEFAULT_TAIL);
    Json(state.monitoring_service.recent_readings(limit).await)
}

/// Analysis bundle with conclusions and KPIs
pub async fn get_analysis(
    Query(query): Query<WindowQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<AnalysisResponse> {
    match state.analysis_service.analyze(query.window).await {
        Ok(report) => Json(AnalysisResponse::Ready(report)),
        Err(AnalysisError::InsufficientData { .. }) => Json(AnalysisResponse::InsufficientData {
            message: "Insufficient data for analysis. Please collect more data points."
                .to_string(),
        }),
    }
}

/// Forecast points plus trajectory outlook
pub async fn get_forecast(
    Query(query): Query<ForecastQuery>,
    State(state): State<Arc<AppState>>,
) -> Json<Forecast> {
    Json(
        state
            .forecast_service
            .forecast(query.horizon, query.seed)
            .await,
    )
}

/// Turn periodic sampling on
pub async fn start_monitoring(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.monitoring_service.start_monitoring();
    Json(json!({ "monitoring": true, "message": "Monitoring started" }))
}

/// Turn periodic sampling off
pub async fn stop_monitoring(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.monitoring_service.stop_monitoring();
    Json(json!({ "monitoring": false, "message": "Monitoring stopped" }))
}

/// Stream readings as they are appended (server-sent events)
pub async fn stream_readings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    sse_from_receiver(state.monitoring_service.subscribe())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_input_clamps_to_percent_scale() {
        let input = MetricInput {
            co2: 120.0,
            methane: -5.0,
            other_ghgs: 50.0,
            energy_intensity: 100.0,
        };
        let reading = input.into_reading().unwrap();
        assert_eq!(reading.co2, 100.0);
        assert_eq!(reading.methane, 0.0);
        assert_eq!(reading.other_ghgs, 50.0);
    }

    #[test]
    fn test_metric_input_rejects_non_finite() {
        let input = MetricInput {
            co2: f64::NAN,
            methane: 0.0,
            other_ghgs: 0.0,
            energy_intensity: 0.0,
        };
        assert!(input.into_reading().is_err());
    }
}
