// Append-only emission series
use super::reading::{Metric, Reading};

/// Ordered history of readings for one monitored entity.
///
/// Insertion order is chronological order; entries are never mutated,
/// reordered, or deleted. This models the accumulate-forever log the
/// monitoring session owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmissionSeries {
    readings: Vec<Reading>,
}

impl EmissionSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    /// Last `min(n, len)` readings in original order.
    pub fn tail(&self, n: usize) -> &[Reading] {
        let len = self.readings.len();
        &self.readings[len - n.min(len)..]
    }

    /// First `min(n, len)` readings in original order.
    pub fn head(&self, n: usize) -> &[Reading] {
        &self.readings[..n.min(self.readings.len())]
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn first(&self) -> Option<&Reading> {
        self.readings.first()
    }

    pub fn last(&self) -> Option<&Reading> {
        self.readings.last()
    }

    /// One metric's column across the whole series.
    pub fn values(&self, metric: Metric) -> impl Iterator<Item = f64> + '_ {
        self.readings.iter().map(move |r| r.get(metric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reading(co2: f64) -> Reading {
        Reading::new(Utc::now(), co2, 0.0, 0.0, 0.0)
    }

    #[test]
    fn test_append_preserves_order() {
        let mut series = EmissionSeries::new();
        assert!(series.is_empty());

        series.append(reading(1.0));
        series.append(reading(2.0));
        series.append(reading(3.0));

        assert_eq!(series.len(), 3);
        let co2: Vec<f64> = series.values(Metric::Co2).collect();
        assert_eq!(co2, vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first().unwrap().co2, 1.0);
        assert_eq!(series.last().unwrap().co2, 3.0);
    }

    #[test]
    fn test_tail_and_head_clamp_to_length() {
        let mut series = EmissionSeries::new();
        for i in 0..4 {
            series.append(reading(i as f64));
        }

        let tail: Vec<f64> = series.tail(2).iter().map(|r| r.co2).collect();
        assert_eq!(tail, vec![2.0, 3.0]);

        let head: Vec<f64> = series.head(2).iter().map(|r| r.co2).collect();
        assert_eq!(head, vec![0.0, 1.0]);

        assert_eq!(series.tail(10).len(), 4);
        assert_eq!(series.head(10).len(), 4);
        assert!(series.tail(0).is_empty());
    }
}
