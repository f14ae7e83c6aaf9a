//! Randomized delay tasks and the sources their delays are drawn from.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tracing::debug;

use crate::{config::TimeUnit, rng::SharedRng};

/// Exclusive upper bound of a drawn delay.
pub const MAX_DELAY: u64 = 10;

/// Supplies the delay each task waits for.
pub trait DelaySource: Send + Sync {
    fn next_delay(&self) -> u64;

    /// Called by a runner before it launches a batch. Sources that replay
    /// their draws rewind here so every batch sees the same delays.
    fn start_batch(&self) {}
}

/// Uniform draws from `[0, MAX_DELAY)`.
///
/// A seeded source restarts its stream at every batch; an entropy-seeded one
/// keeps drawing fresh values.
pub struct RandomDelays {
    rng: SharedRng,
    seed: Option<u64>,
}

impl RandomDelays {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SharedRng::new(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: SharedRng::from_entropy(),
            seed: None,
        }
    }
}

impl Default for RandomDelays {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl DelaySource for RandomDelays {
    fn next_delay(&self) -> u64 {
        self.rng.below(MAX_DELAY)
    }

    fn start_batch(&self) {
        if let Some(seed) = self.seed {
            self.rng.reseed(seed);
        }
    }
}

/// Cycles through a fixed sequence of delays, wrapping at the end and
/// rewinding at the start of every batch.
pub struct FixedDelays {
    delays: Vec<u64>,
    cursor: AtomicUsize,
}

impl FixedDelays {
    pub fn new(delays: Vec<u64>) -> Self {
        Self {
            delays,
            cursor: AtomicUsize::new(0),
        }
    }
}

impl DelaySource for FixedDelays {
    fn next_delay(&self) -> u64 {
        if self.delays.is_empty() {
            return 0;
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.delays.len();
        self.delays[index]
    }

    fn start_batch(&self) {
        self.cursor.store(0, Ordering::Relaxed);
    }
}

/// One unit of randomized waiting work.
#[derive(Clone)]
pub struct DelayTask {
    source: Arc<dyn DelaySource>,
    unit: TimeUnit,
}

impl DelayTask {
    pub fn new(source: Arc<dyn DelaySource>, unit: TimeUnit) -> Self {
        Self { source, unit }
    }

    /// Draws a delay, sleeps for it without blocking the worker thread, and
    /// returns the drawn amount.
    pub async fn run(self) -> u64 {
        let delay = self.source.next_delay();
        tokio::time::sleep(self.unit.duration(delay)).await;
        debug!(delay, unit = %self.unit, "delay task finished");
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::Instant;

    #[test]
    fn fixed_delays_cycle() {
        let source = FixedDelays::new(vec![3, 1, 4]);
        let drawn: Vec<u64> = (0..7).map(|_| source.next_delay()).collect();
        assert_eq!(drawn, vec![3, 1, 4, 3, 1, 4, 3]);
    }

    #[test]
    fn fixed_delays_rewind_each_batch() {
        let source = FixedDelays::new(vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3]);

        source.start_batch();
        let first: Vec<u64> = (0..3).map(|_| source.next_delay()).collect();
        source.start_batch();
        let second: Vec<u64> = (0..3).map(|_| source.next_delay()).collect();

        assert_eq!(first, vec![3, 1, 4]);
        assert_eq!(first, second);
    }

    #[test]
    fn seeded_random_delays_replay_each_batch() {
        let source = RandomDelays::seeded(5);

        source.start_batch();
        let first: Vec<u64> = (0..10).map(|_| source.next_delay()).collect();
        source.start_batch();
        let second: Vec<u64> = (0..10).map(|_| source.next_delay()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_fixed_delays_yield_zero() {
        let source = FixedDelays::new(Vec::new());
        assert_eq!(source.next_delay(), 0);
        assert_eq!(source.next_delay(), 0);
    }

    #[test]
    fn seeded_random_delays_are_reproducible_and_bounded() {
        let a = RandomDelays::seeded(11);
        let b = RandomDelays::seeded(11);
        for _ in 0..100 {
            let delay = a.next_delay();
            assert_eq!(delay, b.next_delay());
            assert!(delay < MAX_DELAY);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn task_waits_for_drawn_delay() {
        let task = DelayTask::new(Arc::new(FixedDelays::new(vec![4])), TimeUnit::Seconds);

        let start = Instant::now();
        let delay = task.run().await;
        let elapsed = start.elapsed();

        assert_eq!(delay, 4);
        assert!(elapsed >= Duration::from_secs(4));
        assert!(elapsed < Duration::from_millis(4_050));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_returns_immediately() {
        let task = DelayTask::new(Arc::new(FixedDelays::new(vec![0])), TimeUnit::Seconds);

        let start = Instant::now();
        assert_eq!(task.run().await, 0);
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
