// Application state for HTTP handlers
use crate::application::analysis_service::AnalysisService;
use crate::application::forecast_service::ForecastService;
use crate::application::monitoring_service::MonitoringService;
use std::sync::Arc;

pub struct AppState {
    pub monitoring_service: Arc<MonitoringService>,
    pub analysis_service: AnalysisService,
    pub forecast_service: ForecastService,
}
