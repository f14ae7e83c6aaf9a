use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    /// A spawned delay task panicked or was cancelled before it could report.
    #[error("delay task failed to complete: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}
