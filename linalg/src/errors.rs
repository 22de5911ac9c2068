use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinalgError {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("operand size mismatch: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },

    #[error("{count} workers cannot evenly partition {size} rows")]
    UnevenPartition { size: usize, count: usize },

    #[error("worker {worker} out of range for {count} workers")]
    WorkerOutOfRange { worker: usize, count: usize },

    #[error("invalid range {start}..{end} for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
}

pub type LinalgResult<T> = std::result::Result<T, LinalgError>;
