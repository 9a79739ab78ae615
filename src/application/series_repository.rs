// Repository trait for series access
use crate::domain::reading::Reading;
use crate::domain::series::EmissionSeries;
use async_trait::async_trait;

/// Access to the monitored series. The series itself is append-only; an
/// implementation only has to serialize appends against reads
/// (single-writer, multiple-reader).
#[async_trait]
pub trait SeriesRepository: Send + Sync {
    /// Append a reading to the end of the series.
    async fn append(&self, reading: Reading);

    /// Last `min(n, len)` readings in chronological order.
    async fn tail(&self, n: usize) -> Vec<Reading>;

    /// A point-in-time copy of the whole series. Analysis and forecasting
    /// operate on such snapshots so each request is atomic.
    async fn snapshot(&self) -> EmissionSeries;

    async fn len(&self) -> usize;
}
