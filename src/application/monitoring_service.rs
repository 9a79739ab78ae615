// Monitoring service - session state and the periodic sampling loop
use crate::application::series_repository::SeriesRepository;
use crate::domain::reading::Reading;
use crate::domain::sampling::SampleGenerator;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns the per-session monitoring state: the currently displayed values,
/// the monitoring on/off flag, and the fan-out channel for appended
/// readings. The series itself lives behind the repository.
pub struct MonitoringService {
    repository: Arc<dyn SeriesRepository>,
    current: RwLock<Option<Reading>>,
    monitoring: AtomicBool,
    events: broadcast::Sender<Reading>,
    sample_interval: Duration,
}

impl MonitoringService {
    pub fn new(repository: Arc<dyn SeriesRepository>, sample_interval: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            repository,
            current: RwLock::new(None),
            monitoring: AtomicBool::new(false),
            events,
            sample_interval,
        }
    }

    /// Currently displayed values; `None` until any data exists.
    pub async fn current(&self) -> Option<Reading> {
        self.current.read().await.clone()
    }

    /// Set the displayed values manually without extending the history.
    pub async fn set_current(&self, reading: Reading) {
        *self.current.write().await = Some(reading);
    }

    /// Generate a random reading and make it the displayed values. The
    /// series is not extended; only explicit appends and the monitoring
    /// loop grow it.
    pub async fn generate_sample(&self, seed: Option<u64>) -> Reading {
        let reading = match seed {
            Some(seed) => SampleGenerator::from_seed(seed).sample(Utc::now()),
            None => SampleGenerator::from_entropy().sample(Utc::now()),
        };
        self.set_current(reading.clone()).await;
        reading
    }

    /// Append a reading, update the displayed values, and notify stream
    /// subscribers.
    pub async fn append_reading(&self, reading: Reading) {
        self.repository.append(reading.clone()).await;
        self.set_current(reading.clone()).await;
        // Nobody listening is fine.
        let _ = self.events.send(reading);
    }

    /// Last `n` appended readings, oldest first.
    pub async fn recent_readings(&self, n: usize) -> Vec<Reading> {
        self.repository.tail(n).await
    }

    pub fn start_monitoring(&self) {
        self.monitoring.store(true, Ordering::SeqCst);
        tracing::info!("monitoring started");
    }

    pub fn stop_monitoring(&self) {
        self.monitoring.store(false, Ordering::SeqCst);
        tracing::info!("monitoring stopped");
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Reading> {
        self.events.subscribe()
    }

    /// Periodic sampling loop. While monitoring is on, every tick samples
    /// a reading and appends it; the core itself stays a set of discrete
    /// operations and this task is the scheduler driving them.
    pub async fn run(self: Arc<Self>) {
        let mut generator = SampleGenerator::from_entropy();
        let mut ticker = tokio::time::interval(self.sample_interval);
        loop {
            ticker.tick().await;
            if !self.is_monitoring() {
                continue;
            }
            let reading = generator.sample(Utc::now());
            tracing::debug!(
                co2 = reading.co2,
                methane = reading.methane,
                "sampled reading"
            );
            self.append_reading(reading).await;
        }
    }
}
