// Trend analysis over an emission series
use super::error::AnalysisError;
use super::reading::{Metric, MetricSet, Reading};
use super::series::EmissionSeries;
use serde::Serialize;

/// Minimum readings before trend analysis is meaningful.
pub const MIN_ANALYSIS_POINTS: usize = 2;

/// Default number of recent readings used for averages and trends.
pub const DEFAULT_WINDOW: usize = 5;

/// Analysis bundle: recent-window averages and trends plus full-series
/// correlations. A pure value; analyzing an unchanged series twice yields
/// equal bundles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub window_len: usize,
    pub averages: MetricSet,
    pub trends: MetricSet,
    pub correlations: CorrelationMatrix,
}

/// Pairwise Pearson coefficients over the full series. `None` marks an
/// undefined coefficient (constant column), matching the way a dataframe
/// correlation yields NaN there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    coefficients: [[Option<f64>; 4]; 4],
}

impl CorrelationMatrix {
    fn from_series(series: &EmissionSeries) -> Self {
        let columns: Vec<Vec<f64>> = Metric::ALL
            .iter()
            .map(|&m| series.values(m).collect())
            .collect();

        let mut coefficients = [[None; 4]; 4];
        for (i, xs) in columns.iter().enumerate() {
            for (j, ys) in columns.iter().enumerate() {
                coefficients[i][j] = pearson(xs, ys);
            }
        }
        Self { coefficients }
    }

    pub fn get(&self, a: Metric, b: Metric) -> Option<f64> {
        let index = |m| Metric::ALL.iter().position(|&x| x == m).unwrap_or(0);
        self.coefficients[index(a)][index(b)]
    }
}

/// Analyze the series: averages and trends over the last
/// `min(window, len)` readings (never fewer than two), correlations over
/// the full series.
///
/// The window/full-series split is deliberate: averages and trends track
/// the short term, while correlations use the whole history.
pub fn analyze(series: &EmissionSeries, window: usize) -> Result<Analysis, AnalysisError> {
    if series.len() < MIN_ANALYSIS_POINTS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_ANALYSIS_POINTS,
            actual: series.len(),
        });
    }

    let recent = series.tail(window.clamp(MIN_ANALYSIS_POINTS, series.len()));

    Ok(Analysis {
        window_len: recent.len(),
        averages: MetricSet::from_fn(|m| column_mean(recent, m)),
        trends: MetricSet::from_fn(|m| first_difference_mean(recent, m)),
        correlations: CorrelationMatrix::from_series(series),
    })
}

fn column_mean(readings: &[Reading], metric: Metric) -> f64 {
    readings.iter().map(|r| r.get(metric)).sum::<f64>() / readings.len() as f64
}

/// Mean of successive differences within the window. Intentionally NOT a
/// regression slope; the forecast engine uses a different trend formula
/// (endpoint slope over the whole series) and the two must stay distinct.
fn first_difference_mean(readings: &[Reading], metric: Metric) -> f64 {
    let diffs: Vec<f64> = readings
        .windows(2)
        .map(|pair| pair[1].get(metric) - pair[0].get(metric))
        .collect();
    diffs.iter().sum::<f64>() / diffs.len() as f64
}

/// Pearson correlation coefficient. `None` when either column is constant
/// or fewer than two paired values exist.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator < f64::EPSILON {
        return None;
    }
    Some(covariance / denominator)
}
