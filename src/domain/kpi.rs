// Key performance indicators over the full series
use super::error::AnalysisError;
use super::reading::{Metric, Reading};
use super::series::EmissionSeries;
use serde::Serialize;

/// Readings required before the first-5 vs last-5 reduction comparison is
/// possible.
pub const MIN_REDUCTION_POINTS: usize = 6;

const COMPARISON_SPAN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplianceStatus {
    Compliant,
    Borderline,
    NonCompliant,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Compliance {
    pub status: ComplianceStatus,
    pub score: f64,
}

/// KPI bundle; fields are `None` where the indicator is undefined for the
/// current series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiReport {
    pub reduction_rate: Option<f64>,
    pub carbon_intensity: Option<f64>,
    pub compliance: Option<Compliance>,
}

impl KpiReport {
    pub fn from_series(series: &EmissionSeries) -> Self {
        Self {
            reduction_rate: reduction_rate(series).ok().flatten(),
            carbon_intensity: carbon_intensity(series),
            compliance: compliance(series),
        }
    }
}

/// Emission reduction rate: first five readings' emission mean against the
/// last five, as a signed percentage of the baseline. `Ok(None)` marks an
/// undefined rate (zero baseline).
pub fn reduction_rate(series: &EmissionSeries) -> Result<Option<f64>, AnalysisError> {
    if series.len() < MIN_REDUCTION_POINTS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_REDUCTION_POINTS,
            actual: series.len(),
        });
    }

    let baseline = emission_mean(series.head(COMPARISON_SPAN));
    let latest = emission_mean(series.tail(COMPARISON_SPAN));
    if baseline == 0.0 {
        return Ok(None);
    }
    Ok(Some((baseline - latest) / baseline * 100.0))
}

/// Carbon intensity ratio: full-series CO2 mean over full-series energy
/// intensity mean. `None` when the energy mean is zero.
pub fn carbon_intensity(series: &EmissionSeries) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    let n = series.len() as f64;
    let co2_mean = series.values(Metric::Co2).sum::<f64>() / n;
    let energy_mean = series.values(Metric::EnergyIntensity).sum::<f64>() / n;
    if energy_mean == 0.0 {
        return None;
    }
    Some(co2_mean / energy_mean)
}

/// Compliance from the latest reading: 100 minus the emission mean, banded
/// at 60 (compliant) and 40 (borderline).
pub fn compliance(series: &EmissionSeries) -> Option<Compliance> {
    let latest = series.last()?;
    let score = 100.0 - latest.emission_mean();
    let status = if score >= 60.0 {
        ComplianceStatus::Compliant
    } else if score >= 40.0 {
        ComplianceStatus::Borderline
    } else {
        ComplianceStatus::NonCompliant
    };
    Some(Compliance { status, score })
}

fn emission_mean(readings: &[Reading]) -> f64 {
    readings.iter().map(Reading::emission_mean).sum::<f64>() / readings.len() as f64
}
