use linalg::Vector;

use crate::{IterationState, LinearSystem, LocalBlock, SolverResult};

use super::SyncStrategy;

/// The whole system as a single block on the calling thread.
#[derive(Debug, Clone)]
pub struct Serial {
    block: LocalBlock,
}

impl Serial {
    pub fn new(system: &LinearSystem) -> SolverResult<Self> {
        Ok(Self {
            block: system.local_block(0, 1)?,
        })
    }
}

impl SyncStrategy for Serial {
    const NAME: &'static str = "serial";

    #[inline]
    fn workers(&self) -> usize {
        1
    }

    fn merge_round(&mut self, state: &IterationState) -> SolverResult<Vector> {
        self.block.next_iterate(&state.x, state.tau)
    }
}
