// In-memory series repository
use crate::application::series_repository::SeriesRepository;
use crate::domain::reading::Reading;
use crate::domain::series::EmissionSeries;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// The monitored series for one session, held in memory. Persistence is a
/// non-goal; the series lives and dies with the process.
#[derive(Debug, Default)]
pub struct InMemorySeriesRepository {
    series: RwLock<EmissionSeries>,
}

impl InMemorySeriesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SeriesRepository for InMemorySeriesRepository {
    async fn append(&self, reading: Reading) {
        self.series.write().await.append(reading);
    }

    async fn tail(&self, n: usize) -> Vec<Reading> {
        self.series.read().await.tail(n).to_vec()
    }

    async fn snapshot(&self) -> EmissionSeries {
        self.series.read().await.clone()
    }

    async fn len(&self) -> usize {
        self.series.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reading(co2: f64) -> Reading {
        Reading::new(Utc::now(), co2, 0.0, 0.0, 0.0)
    }

    #[tokio::test]
    async fn test_append_and_tail() {
        let repository = InMemorySeriesRepository::new();
        assert_eq!(repository.len().await, 0);

        for i in 0..4 {
            repository.append(reading(i as f64)).await;
        }

        let tail = repository.tail(2).await;
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].co2, 2.0);
        assert_eq!(tail[1].co2, 3.0);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let repository = InMemorySeriesRepository::new();
        repository.append(reading(1.0)).await;

        let snapshot = repository.snapshot().await;
        repository.append(reading(2.0)).await;

        // The snapshot does not see later appends.
        assert_eq!(snapshot.len(), 1);
        assert_eq!(repository.len().await, 2);
    }
}
