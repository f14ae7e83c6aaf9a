use std::io::Write;

use serde::Serialize;

use crate::{
    config::{OutputFormat, TimeUnit},
    error::BenchError,
    runner::{Strategy, TimingResult},
};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

#[derive(Serialize)]
struct JsonRecord {
    strategy: Strategy,
    total_run_time_ns: u64,
    total_run_time_secs: f64,
    sum_of_delays: u64,
    unit: TimeUnit,
}

/// Writes one line per runner result.
pub struct Reporter<W: Write> {
    out: W,
    format: OutputFormat,
    unit: TimeUnit,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: OutputFormat, unit: TimeUnit) -> Self {
        Self { out, format, unit }
    }

    pub fn report(&mut self, label: Strategy, result: &TimingResult) -> Result<(), BenchError> {
        let run_time_ns = result.total_run_time_ns();
        let run_time_secs = run_time_ns as f64 / NANOS_PER_SECOND;
        match self.format {
            OutputFormat::Text => writeln!(
                self.out,
                "Total Run Time: {run_time_secs:?} seconds, Sum of random delays: {} {}",
                result.sum_of_delays(),
                self.unit.label()
            )?,
            OutputFormat::Json => {
                let record = JsonRecord {
                    strategy: label,
                    total_run_time_ns: u64::try_from(run_time_ns).unwrap_or(u64::MAX),
                    total_run_time_secs: run_time_secs,
                    sum_of_delays: result.sum_of_delays(),
                    unit: self.unit,
                };
                serde_json::to_writer(&mut self.out, &record).map_err(std::io::Error::from)?;
                writeln!(self.out)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
