//! Ways of combining per-worker updates into one global iterate per round.
//!
//! Every strategy realizes the same round:
//!
//! ```text
//! ROUND_START -> LOCAL_COMPUTE -> MERGE -> CONVERGENCE_CHECK -> DISTRIBUTE -> ROUND_START
//!                                                             \-> TERMINATED
//! ```
//!
//! `LOCAL_COMPUTE` is the only parallel state. `MERGE` is a barrier: the coordinator holds all
//! blocks, concatenated in worker order, before anyone starts the next round.
//! `CONVERGENCE_CHECK` belongs to [`crate::Coordinator`], not to the strategy.

mod message_passing;
pub use message_passing::MessagePassing;

mod serial;
pub use serial::Serial;

mod shared_memory;
pub use shared_memory::SharedMemory;

use linalg::Vector;

use crate::{IterationState, SolverResult};

pub trait SyncStrategy {
    const NAME: &'static str;

    /// Number of row blocks the system is split into
    fn workers(&self) -> usize;

    /// Whether this participant merges and decides convergence
    fn is_coordinator(&self) -> bool {
        true
    }

    /// Coordinator: run `LOCAL_COMPUTE` for the blocks computed here and `MERGE` every block
    /// in worker order into the next global iterate.
    fn merge_round(&mut self, state: &IterationState) -> SolverResult<Vector>;

    /// Coordinator: `DISTRIBUTE` the state decided for the next round. With `finished` set no
    /// iterate or step size follows.
    fn distribute(&mut self, _state: &IterationState, _finished: bool) -> SolverResult<()> {
        Ok(())
    }

    /// Worker: `LOCAL_COMPUTE` and hand the block to the coordinator.
    fn contribute(&mut self, _state: &IterationState) -> SolverResult<()> {
        Err(crate::SolverError::NotAWorker(Self::NAME))
    }

    /// Worker: wait for the coordinator's decision. Returns `false` once terminated, otherwise
    /// installs the new iterate and step size in `state`.
    fn receive(&mut self, _state: &mut IterationState) -> SolverResult<bool> {
        Err(crate::SolverError::NotAWorker(Self::NAME))
    }
}
