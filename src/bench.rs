use std::sync::Arc;

use tracing::info;

use crate::{
    config::BenchSettings,
    delay::{DelaySource, RandomDelays},
    error::BenchError,
    runner::{ConcurrentRunner, SequentialRunner, Strategy, TimingResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub strategy: Strategy,
    pub result: TimingResult,
}

pub struct BenchmarkBuilder {
    settings: BenchSettings,
    source: Option<Arc<dyn DelaySource>>,
}

impl BenchmarkBuilder {
    pub fn new(settings: BenchSettings) -> Self {
        Self {
            settings,
            source: None,
        }
    }

    /// Replaces the random delay generator, e.g. with `FixedDelays` in tests.
    pub fn with_delay_source(mut self, source: impl DelaySource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn build(self) -> Benchmark {
        let source: Arc<dyn DelaySource> = match (self.source, self.settings.seed) {
            (Some(source), _) => source,
            (None, Some(seed)) => Arc::new(RandomDelays::seeded(seed)),
            (None, None) => Arc::new(RandomDelays::from_entropy()),
        };
        Benchmark {
            concurrent: ConcurrentRunner::new(&self.settings, Arc::clone(&source)),
            sequential: SequentialRunner::new(&self.settings, source),
            settings: self.settings,
        }
    }
}

/// Runs the concurrent strategy, then the sequential one, over one delay source.
pub struct Benchmark {
    concurrent: ConcurrentRunner,
    sequential: SequentialRunner,
    settings: BenchSettings,
}

impl Benchmark {
    pub fn settings(&self) -> &BenchSettings {
        &self.settings
    }

    pub async fn run(&self) -> Result<Vec<RunOutcome>, BenchError> {
        self.run_with_hook(|_| Ok(())).await
    }

    /// Like [`Benchmark::run`], calling `hook` as soon as each strategy finishes.
    /// A hook error stops the benchmark before the next strategy starts.
    pub async fn run_with_hook<F>(&self, mut hook: F) -> Result<Vec<RunOutcome>, BenchError>
    where
        F: FnMut(&RunOutcome) -> Result<(), BenchError>,
    {
        info!(
            tasks = self.settings.task_count,
            unit = %self.settings.unit,
            "starting benchmark"
        );
        let mut outcomes = Vec::with_capacity(2);

        let concurrent = RunOutcome {
            strategy: Strategy::Concurrent,
            result: self.concurrent.run().await?,
        };
        hook(&concurrent)?;
        outcomes.push(concurrent);

        let sequential = RunOutcome {
            strategy: Strategy::Sequential,
            result: self.sequential.run().await,
        };
        hook(&sequential)?;
        outcomes.push(sequential);

        Ok(outcomes)
    }
}
