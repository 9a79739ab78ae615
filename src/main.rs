// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::application::analysis_service::AnalysisService;
use crate::application::forecast_service::ForecastService;
use crate::application::monitoring_service::MonitoringService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::memory_repository::InMemorySeriesRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_analysis, get_current, get_forecast, health_check, list_readings, post_reading,
    post_sample, put_current, start_monitoring, stop_monitoring, stream_readings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let app_config = load_app_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(InMemorySeriesRepository::new());

    // Create services (application layer)
    let monitoring_service = Arc::new(MonitoringService::new(
        repository.clone(),
        Duration::from_secs(app_config.monitoring.sample_interval_secs),
    ));
    let analysis_service =
        AnalysisService::new(repository.clone(), app_config.monitoring.analysis_window);
    let forecast_service =
        ForecastService::new(repository.clone(), app_config.monitoring.forecast_horizon);

    // Background sampling task; it only appends while monitoring is on
    tokio::spawn(monitoring_service.clone().run());

    // Create application state
    let state = Arc::new(AppState {
        monitoring_service,
        analysis_service,
        forecast_service,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/current", get(get_current).put(put_current))
        .route("/sample", post(post_sample))
        .route("/readings", get(list_readings).post(post_reading))
        .route("/analysis", get(get_analysis))
        .route("/forecast", get(get_forecast))
        .route("/monitor/start", post(start_monitoring))
        .route("/monitor/stop", post(stop_monitoring))
        .route("/stream", get(stream_readings))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = app_config.server.listen.parse()?;
    println!("Starting emission-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
