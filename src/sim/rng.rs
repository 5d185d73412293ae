//! Uniform random source
//!
//! The simulation only ever asks for uniform floats. Seeded PCG keeps runs
//! reproducible across platforms.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniformly distributed floats
pub trait RandomSource {
    /// Uniform value in `[min, max)`. Returns `min` when the range is empty.
    fn uniform(&mut self, min: f32, max: f32) -> f32;
}

/// PCG-backed random source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed taken from the OS entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        // random_range panics on an empty range; a zero-width lane is legal
        if !(min < max) {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = SeededRandom::new(7);
        for _ in 0..10_000 {
            let v = rng.uniform(-12.5, 12.5);
            assert!((-12.5..12.5).contains(&v));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SeededRandom::new(42);
        let mut b = SeededRandom::new(42);
        for _ in 0..100 {
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
        }
    }

    #[test]
    fn test_empty_range_returns_min() {
        let mut rng = SeededRandom::new(1);
        assert_eq!(rng.uniform(3.0, 3.0), 3.0);
        assert_eq!(rng.uniform(5.0, -5.0), 5.0);
    }

    #[test]
    fn test_covers_both_halves() {
        let mut rng = SeededRandom::new(99);
        let samples: Vec<f32> = (0..1000).map(|_| rng.uniform(-1.0, 1.0)).collect();
        assert!(samples.iter().any(|v| *v < 0.0));
        assert!(samples.iter().any(|v| *v > 0.0));
    }
}
