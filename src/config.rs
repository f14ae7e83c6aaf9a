use std::{fmt, time::Duration};

use clap::ValueEnum;
use serde::Serialize;

pub const DEFAULT_TASK_COUNT: usize = 10;

/// Unit a drawn delay is measured in before it becomes a real wait.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Seconds,
    Deciseconds,
    Milliseconds,
}

impl TimeUnit {
    pub fn duration(self, amount: u64) -> Duration {
        match self {
            TimeUnit::Seconds => Duration::from_secs(amount),
            TimeUnit::Deciseconds => Duration::from_millis(amount.saturating_mul(100)),
            TimeUnit::Milliseconds => Duration::from_millis(amount),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Deciseconds => "deciseconds",
            TimeUnit::Milliseconds => "milliseconds",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct BenchSettings {
    /// Number of delay tasks each runner launches.
    pub task_count: usize,
    pub unit: TimeUnit,
    /// Seed for the delay generator; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            task_count: DEFAULT_TASK_COUNT,
            unit: TimeUnit::default(),
            seed: None,
        }
    }
}
