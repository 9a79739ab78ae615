// Analysis service - use case for analyzing the series
use crate::application::series_repository::SeriesRepository;
use crate::domain::analysis::{analyze, Analysis};
use crate::domain::conclusion::{compose_conclusions, Conclusion};
use crate::domain::error::AnalysisError;
use crate::domain::kpi::KpiReport;
use serde::Serialize;
use std::sync::Arc;

/// Everything the dashboard shows for one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis: Analysis,
    pub conclusions: Vec<Conclusion>,
    pub kpis: KpiReport,
}

#[derive(Clone)]
pub struct AnalysisService {
    repository: Arc<dyn SeriesRepository>,
    default_window: usize,
}

impl AnalysisService {
    pub fn new(repository: Arc<dyn SeriesRepository>, default_window: usize) -> Self {
        Self {
            repository,
            default_window,
        }
    }

    /// Analyze a snapshot of the series and derive conclusions and KPIs
    /// from it. `InsufficientData` is a normal outcome for a young series;
    /// callers surface it as an informational message.
    pub async fn analyze(&self, window: Option<usize>) -> Result<AnalysisReport, AnalysisError> {
        let snapshot = self.repository.snapshot().await;
        let analysis = analyze(&snapshot, window.unwrap_or(self.default_window))?;
        let conclusions = compose_conclusions(&analysis);
        let kpis = KpiReport::from_series(&snapshot);
        Ok(AnalysisReport {
            analysis,
            conclusions,
            kpis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::Reading;
    use crate::infrastructure::memory_repository::InMemorySeriesRepository;
    use chrono::Utc;

    #[tokio::test]
    async fn test_insufficient_data_on_short_series() {
        let repository = Arc::new(InMemorySeriesRepository::new());
        let service = AnalysisService::new(repository.clone(), 5);

        assert!(matches!(
            service.analyze(None).await,
            Err(AnalysisError::InsufficientData { required: 2, .. })
        ));

        repository
            .append(Reading::new(Utc::now(), 20.0, 10.0, 10.0, 40.0))
            .await;
        repository
            .append(Reading::new(Utc::now(), 30.0, 10.0, 10.0, 40.0))
            .await;

        let report = service.analyze(None).await.unwrap();
        assert_eq!(report.analysis.averages.co2, 25.0);
        assert!(!report.conclusions.is_empty());
        // Too few points for the reduction-rate KPI, but the others exist.
        assert_eq!(report.kpis.reduction_rate, None);
        assert!(report.kpis.compliance.is_some());
    }
}
