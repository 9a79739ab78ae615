// Forward projection of the emission series
use super::reading::MetricSet;
use super::series::EmissionSeries;
use chrono::{DateTime, Days, NaiveDate, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

/// Projection horizon in days when the caller does not override it.
pub const DEFAULT_HORIZON: usize = 5;

const NOISE_STD_DEV: f64 = 3.0;

// Seeds used when no history exists yet.
const FALLBACK_LAST_VALUES: MetricSet = MetricSet::new(50.0, 40.0, 30.0, 60.0);
const FALLBACK_TRENDS: MetricSet = MetricSet::new(1.0, -0.5, 0.7, -0.3);

/// One projected future reading, tagged with its calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedReading {
    pub date: NaiveDate,
    pub co2: f64,
    pub methane: f64,
    pub other_ghgs: f64,
    pub energy_intensity: f64,
}

impl ProjectedReading {
    fn emission_mean(&self) -> f64 {
        (self.co2 + self.methane + self.other_ghgs) / 3.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrajectoryDirection {
    Increasing,
    Decreasing,
}

/// Comparison of current emission levels against the end of the projection,
/// with canned guidance per branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryOutlook {
    pub direction: TrajectoryDirection,
    pub overall_current: f64,
    pub overall_projected: f64,
    pub summary: String,
    pub notes: Vec<String>,
    pub recommended_actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub points: Vec<ProjectedReading>,
    pub trajectory: TrajectoryOutlook,
}

/// Extrapolate each metric `horizon` days forward from the series.
///
/// The per-metric trend is the endpoint slope (last - first) / len over the
/// whole series, deliberately not the analyzer's windowed first-difference
/// mean; the two are distinct algorithms and must stay that way. Each step
/// adds zero-mean Gaussian noise per metric and clamps to [0, 100]. An
/// empty series falls back to fixed seed values, and a single reading
/// projects flat (zero trend) from that reading.
pub fn project<R: Rng>(
    series: &EmissionSeries,
    horizon: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Forecast {
    let (last_values, trends) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => {
            let len = series.len() as f64;
            (
                MetricSet::from_fn(|m| last.get(m)),
                MetricSet::from_fn(|m| (last.get(m) - first.get(m)) / len),
            )
        }
        _ => (FALLBACK_LAST_VALUES, FALLBACK_TRENDS),
    };

    let noise = Normal::new(0.0, NOISE_STD_DEV).expect("noise std dev is positive");
    let start_date = now.date_naive();

    let points: Vec<ProjectedReading> = (1..=horizon)
        .map(|step| {
            let values = MetricSet::from_fn(|m| {
                let projected = last_values.get(m)
                    + trends.get(m) * step as f64
                    + noise.sample(rng);
                projected.clamp(0.0, 100.0)
            });
            ProjectedReading {
                // Calendar arithmetic so month/year boundaries roll over.
                date: start_date + Days::new(step as u64),
                co2: values.co2,
                methane: values.methane,
                other_ghgs: values.other_ghgs,
                energy_intensity: values.energy_intensity,
            }
        })
        .collect();

    let trajectory = trajectory_outlook(&last_values, &points, horizon);
    Forecast { points, trajectory }
}

fn trajectory_outlook(
    last_values: &MetricSet,
    points: &[ProjectedReading],
    horizon: usize,
) -> TrajectoryOutlook {
    let overall_current =
        (last_values.co2 + last_values.methane + last_values.other_ghgs) / 3.0;
    let (overall_projected, co2_projected, methane_projected) = match points.last() {
        Some(p) => (p.emission_mean(), p.co2, p.methane),
        None => (overall_current, last_values.co2, last_values.methane),
    };

    let notes = vec![
        projection_note("CO2", last_values.co2, co2_projected, horizon, true),
        projection_note("Methane", last_values.methane, methane_projected, horizon, false),
    ];

    if overall_projected > overall_current {
        TrajectoryOutlook {
            direction: TrajectoryDirection::Increasing,
            overall_current,
            overall_projected,
            summary: format!(
                "Overall emissions are projected to increase by {:.1}% over the next {} days.",
                overall_projected - overall_current,
                horizon
            ),
            notes,
            recommended_actions: vec![
                "Review and optimize energy consumption patterns".to_string(),
                "Investigate sources of increasing emissions".to_string(),
                "Consider implementing carbon capture technologies".to_string(),
                "Accelerate transition to renewable energy sources".to_string(),
            ],
        }
    } else {
        TrajectoryOutlook {
            direction: TrajectoryDirection::Decreasing,
            overall_current,
            overall_projected,
            summary: format!(
                "Overall emissions are projected to decrease by {:.1}% over the next {} days.",
                overall_current - overall_projected,
                horizon
            ),
            notes,
            recommended_actions: vec![
                "Continue current emission reduction strategies".to_string(),
                "Document successful practices for scaling".to_string(),
                "Consider setting more ambitious reduction targets".to_string(),
            ],
        }
    }
}

fn projection_note(
    label: &str,
    current: f64,
    projected: f64,
    horizon: usize,
    suggest_measures: bool,
) -> String {
    if projected > current {
        let mut note = format!(
            "{} emissions are projected to increase by {:.1}% over the next {} days.",
            label,
            projected - current,
            horizon
        );
        if suggest_measures {
            note.push_str(" Consider implementing additional carbon reduction measures.");
        }
        note
    } else {
        format!(
            "{} emissions are projected to decrease by {:.1}% over the next {} days.",
            label,
            current - projected,
            horizon
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::Reading;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn series_of(rows: &[(f64, f64, f64, f64)]) -> EmissionSeries {
        let mut series = EmissionSeries::new();
        for &(co2, methane, other, energy) in rows {
            series.append(Reading::new(Utc::now(), co2, methane, other, energy));
        }
        series
    }

    fn noon_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_output_length_matches_horizon() {
        let series = series_of(&[(50.0, 40.0, 30.0, 60.0), (55.0, 42.0, 29.0, 58.0)]);
        let mut rng = StdRng::seed_from_u64(1);
        for horizon in [1, 5, 10] {
            let forecast = project(&series, horizon, Utc::now(), &mut rng);
            assert_eq!(forecast.points.len(), horizon);
        }
    }

    #[test]
    fn test_projection_is_clamped() {
        // Steep positive slope pushes every step far past 100 before the
        // clamp; a steep negative slope pushes below 0.
        let rising = series_of(&[(0.0, 0.0, 0.0, 0.0), (99.0, 99.0, 99.0, 99.0)]);
        let falling = series_of(&[(99.0, 99.0, 99.0, 99.0), (0.0, 0.0, 0.0, 0.0)]);
        let mut rng = StdRng::seed_from_u64(2);

        for series in [rising, falling] {
            let forecast = project(&series, 5, Utc::now(), &mut rng);
            for point in &forecast.points {
                for value in [point.co2, point.methane, point.other_ghgs, point.energy_intensity] {
                    assert!((0.0..=100.0).contains(&value), "value {value} escaped clamp");
                }
            }
        }
    }

    #[test]
    fn test_empty_series_uses_fallback_seeds() {
        let mut rng = StdRng::seed_from_u64(3);
        let forecast = project(&EmissionSeries::new(), 5, Utc::now(), &mut rng);

        // Step 1 co2 is 50 + 1*1 + noise; noise has std dev 3, so a 15-point
        // band around 51 is far beyond five sigmas.
        let first = &forecast.points[0];
        assert!((first.co2 - 51.0).abs() < 15.0);
        assert!((first.methane - 39.5).abs() < 15.0);
        assert!((first.other_ghgs - 30.7).abs() < 15.0);
        assert!((first.energy_intensity - 59.7).abs() < 15.0);
    }

    #[test]
    fn test_single_reading_projects_flat() {
        // One reading: endpoint slope is zero, so only noise moves values.
        let series = series_of(&[(42.0, 24.0, 66.0, 33.0)]);
        let mut rng = StdRng::seed_from_u64(4);
        let forecast = project(&series, 5, Utc::now(), &mut rng);

        for point in &forecast.points {
            assert!((point.co2 - 42.0).abs() < 15.0);
            assert!((point.methane - 24.0).abs() < 15.0);
        }
    }

    #[test]
    fn test_same_seed_same_forecast() {
        let series = series_of(&[(50.0, 40.0, 30.0, 60.0), (55.0, 42.0, 29.0, 58.0)]);
        let now = noon_utc(2026, 8, 7);
        let a = project(&series, 5, now, &mut StdRng::seed_from_u64(9));
        let b = project(&series, 5, now, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_dates_roll_over_month_boundary() {
        let series = series_of(&[(50.0, 40.0, 30.0, 60.0), (55.0, 42.0, 29.0, 58.0)]);
        let mut rng = StdRng::seed_from_u64(5);
        let forecast = project(&series, 5, noon_utc(2026, 1, 30), &mut rng);

        let dates: Vec<NaiveDate> = forecast.points.iter().map(|p| p.date).collect();
        let expected: Vec<NaiveDate> = [(1, 31), (2, 1), (2, 2), (2, 3), (2, 4)]
            .iter()
            .map(|&(m, d)| NaiveDate::from_ymd_opt(2026, m, d).unwrap())
            .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_trajectory_classification() {
        // Slope so steep the last point saturates at 100 regardless of noise.
        let rising = series_of(&[(0.0, 0.0, 0.0, 0.0), (90.0, 90.0, 90.0, 90.0)]);
        let mut rng = StdRng::seed_from_u64(6);
        let forecast = project(&rising, 5, Utc::now(), &mut rng);
        assert_eq!(
            forecast.trajectory.direction,
            TrajectoryDirection::Increasing
        );
        assert_eq!(forecast.trajectory.recommended_actions.len(), 4);
        assert!(forecast.trajectory.summary.contains("increase"));

        let falling = series_of(&[(90.0, 90.0, 90.0, 90.0), (10.0, 10.0, 10.0, 10.0)]);
        let forecast = project(&falling, 5, Utc::now(), &mut rng);
        assert_eq!(
            forecast.trajectory.direction,
            TrajectoryDirection::Decreasing
        );
        assert_eq!(forecast.trajectory.recommended_actions.len(), 3);
        assert_eq!(forecast.trajectory.notes.len(), 2);
    }
}
