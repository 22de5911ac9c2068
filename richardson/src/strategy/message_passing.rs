use communicator::{SolverComm, Tag};
use linalg::Vector;

use crate::{IterationState, LinearSystem, LocalBlock, SolverResult};

use super::SyncStrategy;

/// One rank of a message-passing world; the root rank coordinates.
///
/// Per round every non-root rank sends its block under [`Tag::Vector`], and the root receives
/// them in rank order, which is the barrier. The root then sends [`Tag::Finish`] to every rank
/// and, only when not finished, the merged iterate under [`Tag::Vector`] followed by the step
/// size under [`Tag::StepSize`]. Workers receive in exactly that order.
#[derive(Debug)]
pub struct MessagePassing<'a, C: SolverComm> {
    comm: &'a C,
    block: LocalBlock,
    size: usize,
}

impl<'a, C: SolverComm> MessagePassing<'a, C> {
    pub fn new(comm: &'a C, system: &LinearSystem) -> SolverResult<Self> {
        Ok(Self {
            comm,
            block: system.local_block(comm.world_rank(), comm.world_size())?,
            size: system.size(),
        })
    }

    #[inline]
    pub fn comm(&self) -> &C {
        self.comm
    }
}

impl<C: SolverComm> SyncStrategy for MessagePassing<'_, C> {
    const NAME: &'static str = "message-passing";

    #[inline]
    fn workers(&self) -> usize {
        self.comm.world_size()
    }

    #[inline]
    fn is_coordinator(&self) -> bool {
        self.comm.is_root()
    }

    fn merge_round(&mut self, state: &IterationState) -> SolverResult<Vector> {
        let mut merged = self.block.next_iterate(&state.x, state.tau)?;
        let block_len = self.block.partition.len();
        for source in 1..self.comm.world_size() {
            let block = self.comm.recv_vec(source, Tag::Vector, block_len)?;
            merged.concatenate(&Vector::from(block));
        }
        Ok(merged)
    }

    fn distribute(&mut self, state: &IterationState, finished: bool) -> SolverResult<()> {
        let world_size = self.comm.world_size();
        for dest in 1..world_size {
            self.comm.send_flag(dest, Tag::Finish, finished)?;
        }
        if !finished {
            for dest in 1..world_size {
                self.comm.send_vec(dest, Tag::Vector, state.x.as_slice())?;
                self.comm.send_f64(dest, Tag::StepSize, state.tau)?;
            }
        }
        Ok(())
    }

    fn contribute(&mut self, state: &IterationState) -> SolverResult<()> {
        let local = self.block.next_iterate(&state.x, state.tau)?;
        self.comm.send_vec(C::ROOT_RANK, Tag::Vector, local.as_slice())?;
        Ok(())
    }

    fn receive(&mut self, state: &mut IterationState) -> SolverResult<bool> {
        if self.comm.recv_flag(C::ROOT_RANK, Tag::Finish)? {
            return Ok(false);
        }
        state.x = self.comm.recv_vec(C::ROOT_RANK, Tag::Vector, self.size)?.into();
        state.tau = self.comm.recv_f64(C::ROOT_RANK, Tag::StepSize)?;
        state.round += 1;
        Ok(true)
    }
}
