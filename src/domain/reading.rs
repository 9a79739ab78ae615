// Emission reading domain models
use chrono::{DateTime, Utc};
use serde::Serialize;

/// The four tracked metrics, all on a 0-100 percent scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Co2,
    Methane,
    OtherGhgs,
    EnergyIntensity,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Co2,
        Metric::Methane,
        Metric::OtherGhgs,
        Metric::EnergyIntensity,
    ];
}

/// One timestamped snapshot of the four emission/energy metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    pub co2: f64,
    pub methane: f64,
    pub other_ghgs: f64,
    pub energy_intensity: f64,
}

impl Reading {
    pub fn new(
        timestamp: DateTime<Utc>,
        co2: f64,
        methane: f64,
        other_ghgs: f64,
        energy_intensity: f64,
    ) -> Self {
        Self {
            timestamp,
            co2,
            methane,
            other_ghgs,
            energy_intensity,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Co2 => self.co2,
            Metric::Methane => self.methane,
            Metric::OtherGhgs => self.other_ghgs,
            Metric::EnergyIntensity => self.energy_intensity,
        }
    }

    /// Mean of the three emission metrics (energy intensity excluded).
    pub fn emission_mean(&self) -> f64 {
        (self.co2 + self.methane + self.other_ghgs) / 3.0
    }
}

/// One f64 per metric; used for averages, trends, and forecast seeds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSet {
    pub co2: f64,
    pub methane: f64,
    pub other_ghgs: f64,
    pub energy_intensity: f64,
}

impl MetricSet {
    pub const fn new(co2: f64, methane: f64, other_ghgs: f64, energy_intensity: f64) -> Self {
        Self {
            co2,
            methane,
            other_ghgs,
            energy_intensity,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Co2 => self.co2,
            Metric::Methane => self.methane,
            Metric::OtherGhgs => self.other_ghgs,
            Metric::EnergyIntensity => self.energy_intensity,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Co2 => self.co2 = value,
            Metric::Methane => self.methane = value,
            Metric::OtherGhgs => self.other_ghgs = value,
            Metric::EnergyIntensity => self.energy_intensity = value,
        }
    }

    /// Build a set by evaluating `f` for each metric.
    pub fn from_fn(mut f: impl FnMut(Metric) -> f64) -> Self {
        let mut set = MetricSet::new(0.0, 0.0, 0.0, 0.0);
        for metric in Metric::ALL {
            set.set(metric, f(metric));
        }
        set
    }

    /// Mean of all four metrics.
    pub fn overall_mean(&self) -> f64 {
        (self.co2 + self.methane + self.other_ghgs + self.energy_intensity) / 4.0
    }
}
