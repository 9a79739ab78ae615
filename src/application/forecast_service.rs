// Forecast service - use case for projecting the series forward
use crate::application::series_repository::SeriesRepository;
use crate::domain::forecast::{project, Forecast};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

#[derive(Clone)]
pub struct ForecastService {
    repository: Arc<dyn SeriesRepository>,
    default_horizon: usize,
}

impl ForecastService {
    pub fn new(repository: Arc<dyn SeriesRepository>, default_horizon: usize) -> Self {
        Self {
            repository,
            default_horizon,
        }
    }

    /// Project the series forward. Works on any series, including an empty
    /// one (fixed fallback seeds). A seed makes the noise deterministic.
    pub async fn forecast(&self, horizon: Option<usize>, seed: Option<u64>) -> Forecast {
        let snapshot = self.repository.snapshot().await;
        let horizon = horizon.unwrap_or(self.default_horizon).max(1);
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        project(&snapshot, horizon, Utc::now(), &mut rng)
    }
}
