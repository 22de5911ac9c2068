use std::{fmt, str::FromStr};

use crate::{SolverError, SolverResult};

/// Relative residual below which the iteration stops.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// The initial step size is `DEFAULT_TAU_SCALE / N` unless configured.
pub const DEFAULT_TAU_SCALE: f64 = 0.1;

/// How partial updates are combined each round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// One worker, no parallelism
    Serial,
    /// Rayon fork-join over threads sharing the iterate
    SharedMemory,
    /// One thread per rank, private memory, point-to-point channels
    Channel,
}

impl FromStr for StrategyKind {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "serial" => Ok(Self::Serial),
            "shared" | "shared-memory" => Ok(Self::SharedMemory),
            "channel" | "message-passing" => Ok(Self::Channel),
            _ => Err(SolverError::StrategyTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => write!(f, "serial"),
            Self::SharedMemory => write!(f, "shared"),
            Self::Channel => write!(f, "channel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub epsilon: f64,
    /// `None` means `DEFAULT_TAU_SCALE / N`
    pub initial_tau: Option<f64>,
    /// `None` iterates until convergence, however long that takes
    pub max_rounds: Option<usize>,
    pub workers: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            initial_tau: None,
            max_rounds: None,
            workers: 1,
        }
    }
}

impl SolverConfig {
    #[inline]
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    #[inline]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[inline]
    pub fn with_initial_tau(mut self, tau: Option<f64>) -> Self {
        self.initial_tau = tau;
        self
    }

    #[inline]
    pub fn with_max_rounds(mut self, max_rounds: Option<usize>) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    #[inline]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[inline]
    pub fn initial_tau_for(&self, n: usize) -> f64 {
        self.initial_tau.unwrap_or(DEFAULT_TAU_SCALE / n as f64)
    }

    /// Reject settings that would make the iteration meaningless for an `n`-row system
    /// split across `workers` workers.
    pub fn validate(&self, n: usize, workers: usize) -> SolverResult<()> {
        if n == 0 {
            return Err(SolverError::Config("the system has no rows".to_string()));
        }
        if workers == 0 {
            return Err(SolverError::Config("worker count must be positive".to_string()));
        }
        if n % workers != 0 {
            return Err(SolverError::Config(format!(
                "{workers} workers cannot evenly partition {n} rows"
            )));
        }
        if self.epsilon.is_nan() || self.epsilon <= 0.0 {
            return Err(SolverError::Config(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        let tau = self.initial_tau_for(n);
        if tau == 0.0 || !tau.is_finite() {
            return Err(SolverError::Config(format!(
                "initial step size must be finite and non-zero, got {tau}"
            )));
        }
        if self.max_rounds == Some(0) {
            return Err(SolverError::Config("max_rounds must be positive".to_string()));
        }
        Ok(())
    }
}
