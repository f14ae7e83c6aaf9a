use std::sync::{Mutex, PoisonError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// ChaCha8 generator shared between concurrently running tasks.
pub struct SharedRng {
    inner: Mutex<ChaCha8Rng>,
}

impl SharedRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Restarts the stream as if freshly built with `seed`.
    pub fn reseed(&self, seed: u64) {
        let mut rng = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Uniform draw from `[0, bound)`. Returns 0 when `bound` is 0.
    pub fn below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        let mut rng = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let rng1 = SharedRng::new(42);
        let rng2 = SharedRng::new(42);

        let seq1: Vec<u64> = (0..16).map(|_| rng1.below(10)).collect();
        let seq2: Vec<u64> = (0..16).map(|_| rng2.below(10)).collect();

        assert_eq!(seq1, seq2, "Same seed should produce same values");
    }

    #[test]
    fn reseed_restarts_sequence() {
        let rng = SharedRng::new(42);
        let first: Vec<u64> = (0..8).map(|_| rng.below(10)).collect();

        rng.reseed(42);
        let second: Vec<u64> = (0..8).map(|_| rng.below(10)).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn draws_stay_below_bound() {
        let rng = SharedRng::from_entropy();
        for _ in 0..1_000 {
            assert!(rng.below(10) < 10);
        }
    }

    #[test]
    fn zero_bound_yields_zero() {
        let rng = SharedRng::new(7);
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn every_value_in_range_is_reachable() {
        let rng = SharedRng::new(3);
        let mut seen = [false; 10];
        for _ in 0..1_000 {
            seen[rng.below(10) as usize] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }
}
