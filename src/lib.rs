pub mod bench;
pub mod config;
pub mod delay;
pub mod error;
pub mod report;
pub mod rng;
pub mod runner;

pub use bench::{Benchmark, BenchmarkBuilder, RunOutcome};
pub use config::{BenchSettings, OutputFormat, TimeUnit};
pub use error::BenchError;
pub use runner::{ConcurrentRunner, SequentialRunner, Strategy, TimingResult};
