// Application layer - use cases over the repository seam
pub mod analysis_service;
pub mod forecast_service;
pub mod monitoring_service;
pub mod series_repository;
