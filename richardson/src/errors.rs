use communicator::CommError;
use linalg::LinalgError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("linear algebra error: {0}")]
    Linalg(#[from] LinalgError),

    #[error("communication error: {0}")]
    Comm(#[from] CommError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("Unknown string `{0}` for synchronization strategy")]
    StrategyTypeError(String),

    #[error("did not converge within {rounds} rounds (relative residual {residual:e})")]
    NotConverged { rounds: usize, residual: f64 },

    #[error("failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("shared block storage poisoned by a panicking worker")]
    Poisoned,

    #[error("worker {0} did not publish its block")]
    MissingBlock(usize),

    #[error("worker {rank} panicked")]
    WorkerPanicked { rank: usize },

    #[error("{0} strategy has no worker role")]
    NotAWorker(&'static str),
}

pub type SolverResult<T> = std::result::Result<T, SolverError>;
