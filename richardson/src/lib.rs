//! Dense `A * x = b` by simple (Richardson) iteration, `x <- x - tau * (A x - b)`, with the
//! rows split into equal contiguous blocks, one per worker.
//!
//! The numeric core ([`richardson_step`], [`ConvergenceOracle`], [`adapt_step_size`]) is shared;
//! only the way blocks are merged and the next round's state distributed differs between
//! strategies, see [`strategy`].

mod config;
pub use config::{SolverConfig, StrategyKind, DEFAULT_EPSILON, DEFAULT_TAU_SCALE};

mod engine;
pub use engine::{
    solve, solve_message_passing, solve_serial, solve_shared_memory, solve_with_channels,
    Coordinator,
};

mod errors;
pub use errors::{SolverError, SolverResult};

mod oracle;
pub use oracle::{adapt_step_size, ConvergenceOracle};

mod state;
pub use state::{IterationState, RoundOutcome, Solution};

pub mod strategy;

mod system;
pub use system::LinearSystem;

mod update;
pub use update::{richardson_step, LocalBlock};
