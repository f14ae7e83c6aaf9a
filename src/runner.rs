//! The two execution strategies under measurement.

use std::{fmt, sync::Arc, time::Duration};

use serde::Serialize;
use tokio::{task::JoinSet, time::Instant};
use tracing::info;

use crate::{
    config::{BenchSettings, TimeUnit},
    delay::{DelaySource, DelayTask},
    error::BenchError,
};

/// Elapsed time and summed delays of one runner invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingResult {
    total_run_time: Duration,
    sum_of_delays: u64,
}

impl TimingResult {
    pub fn new(total_run_time: Duration, sum_of_delays: u64) -> Self {
        Self {
            total_run_time,
            sum_of_delays,
        }
    }

    pub fn total_run_time(&self) -> Duration {
        self.total_run_time
    }

    pub fn total_run_time_ns(&self) -> u128 {
        self.total_run_time.as_nanos()
    }

    pub fn sum_of_delays(&self) -> u64 {
        self.sum_of_delays
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Concurrent,
    Sequential,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Concurrent => f.write_str("concurrent"),
            Strategy::Sequential => f.write_str("sequential"),
        }
    }
}

/// Pins at `u64::MAX` instead of wrapping.
fn add_delay(sum: u64, delay: u64) -> u64 {
    sum.saturating_add(delay)
}

/// Launches every task at once and waits for the last one.
pub struct ConcurrentRunner {
    task_count: usize,
    unit: TimeUnit,
    source: Arc<dyn DelaySource>,
}

impl ConcurrentRunner {
    pub fn new(settings: &BenchSettings, source: Arc<dyn DelaySource>) -> Self {
        Self {
            task_count: settings.task_count,
            unit: settings.unit,
            source,
        }
    }

    /// Must be called from within a tokio runtime.
    ///
    /// If any task fails the rest are aborted and the batch reports the error.
    pub async fn run(&self) -> Result<TimingResult, BenchError> {
        self.source.start_batch();
        let start = Instant::now();
        let mut tasks = JoinSet::new();
        for _ in 0..self.task_count {
            let task = DelayTask::new(Arc::clone(&self.source), self.unit);
            tasks.spawn(task.run());
        }

        let mut sum_of_delays = 0_u64;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(delay) => sum_of_delays = add_delay(sum_of_delays, delay),
                Err(err) => {
                    tasks.abort_all();
                    return Err(err.into());
                }
            }
        }
        let result = TimingResult::new(start.elapsed(), sum_of_delays);

        info!(
            tasks = self.task_count,
            elapsed_ms = result.total_run_time().as_secs_f64() * 1_000.0,
            sum_of_delays,
            "concurrent batch finished"
        );
        Ok(result)
    }
}

/// Awaits each task to completion before starting the next.
pub struct SequentialRunner {
    task_count: usize,
    unit: TimeUnit,
    source: Arc<dyn DelaySource>,
}

impl SequentialRunner {
    pub fn new(settings: &BenchSettings, source: Arc<dyn DelaySource>) -> Self {
        Self {
            task_count: settings.task_count,
            unit: settings.unit,
            source,
        }
    }

    pub async fn run(&self) -> TimingResult {
        self.source.start_batch();
        let start = Instant::now();
        let mut sum_of_delays = 0_u64;
        for _ in 0..self.task_count {
            let delay = DelayTask::new(Arc::clone(&self.source), self.unit)
                .run()
                .await;
            sum_of_delays = add_delay(sum_of_delays, delay);
        }
        let result = TimingResult::new(start.elapsed(), sum_of_delays);

        info!(
            tasks = self.task_count,
            elapsed_ms = result.total_run_time().as_secs_f64() * 1_000.0,
            sum_of_delays,
            "sequential batch finished"
        );
        result
    }
}
