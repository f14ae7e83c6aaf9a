use std::io::stdout;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use await_bench::{
    config::{BenchSettings, OutputFormat, TimeUnit},
    report::Reporter,
    BenchmarkBuilder,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Concurrent vs sequential delay benchmark")]
struct Cli {
    /// Seed the delay generator for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Unit each drawn delay is waited in
    #[arg(long, value_enum, default_value_t = TimeUnit::Seconds)]
    unit: TimeUnit,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log filter directive, written to stderr
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn log_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("invalid --log-level '{directive}'"))
}

fn init_tracing(directive: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(directive)?)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let settings = BenchSettings {
        seed: cli.seed,
        unit: cli.unit,
        ..BenchSettings::default()
    };
    let benchmark = BenchmarkBuilder::new(settings).build();

    let mut reporter = Reporter::new(stdout().lock(), cli.format, benchmark.settings().unit);
    benchmark
        .run_with_hook(|outcome| reporter.report(outcome.strategy, &outcome.result))
        .await
        .context("benchmark aborted")?;
    Ok(())
}
