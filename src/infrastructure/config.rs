use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub monitoring: MonitoringSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitoringSettings {
    /// Seconds between automatic samples while monitoring is on.
    #[serde(default = "default_sample_interval")]
    pub sample_interval_secs: u64,
    /// Recent readings used for averages and trends.
    #[serde(default = "default_analysis_window")]
    pub analysis_window: usize,
    /// Days projected by the forecast.
    #[serde(default = "default_forecast_horizon")]
    pub forecast_horizon: usize,
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_sample_interval() -> u64 {
    3
}

fn default_analysis_window() -> usize {
    crate::domain::analysis::DEFAULT_WINDOW
}

fn default_forecast_horizon() -> usize {
    crate::domain::forecast::DEFAULT_HORIZON
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/monitor"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
