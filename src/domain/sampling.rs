// Synthetic reading generation
use super::reading::Reading;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces synthetic instantaneous readings from an injected randomness
/// source. Each metric is drawn uniformly at integer granularity from its
/// own range, independently of the others.
#[derive(Debug)]
pub struct SampleGenerator<R: Rng> {
    rng: R,
}

impl SampleGenerator<StdRng> {
    /// Deterministic generator for a given seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// OS-entropy-backed generator.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> SampleGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn sample(&mut self, now: DateTime<Utc>) -> Reading {
        Reading::new(
            now,
            self.rng.gen_range(10..=80) as f64,
            self.rng.gen_range(5..=60) as f64,
            self.rng.gen_range(15..=90) as f64,
            self.rng.gen_range(20..=85) as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_within_ranges() {
        let mut generator = SampleGenerator::from_seed(7);
        let now = Utc::now();
        for _ in 0..200 {
            let reading = generator.sample(now);
            assert!((10.0..=80.0).contains(&reading.co2));
            assert!((5.0..=60.0).contains(&reading.methane));
            assert!((15.0..=90.0).contains(&reading.other_ghgs));
            assert!((20.0..=85.0).contains(&reading.energy_intensity));
            assert_eq!(reading.co2.fract(), 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let now = Utc::now();
        let mut a = SampleGenerator::from_seed(42);
        let mut b = SampleGenerator::from_seed(42);
        for _ in 0..10 {
            assert_eq!(a.sample(now), b.sample(now));
        }
    }
}
