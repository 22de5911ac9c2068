use std::sync::Mutex;

use linalg::Vector;
use rayon::{
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
    ThreadPool, ThreadPoolBuilder,
};

use crate::{IterationState, LinearSystem, LocalBlock, SolverError, SolverResult};

use super::SyncStrategy;

/// Fork-join over a dedicated rayon pool with one thread per worker.
///
/// Workers read the shared round-start iterate and publish into their own slot; the lock only
/// guards the act of publishing. Returning from the parallel region is the barrier, after which
/// the calling thread concatenates the slots in worker order.
#[derive(Debug)]
pub struct SharedMemory {
    blocks: Vec<LocalBlock>,
    slots: Mutex<Vec<Option<Vector>>>,
    pool: ThreadPool,
}

impl SharedMemory {
    pub fn new(system: &LinearSystem, workers: usize) -> SolverResult<Self> {
        let blocks = system.local_blocks(workers)?;
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("richardson-worker-{index}"))
            .build()?;
        Ok(Self {
            blocks,
            slots: Mutex::new(vec![None; workers]),
            pool,
        })
    }
}

impl SyncStrategy for SharedMemory {
    const NAME: &'static str = "shared-memory";

    #[inline]
    fn workers(&self) -> usize {
        self.blocks.len()
    }

    fn merge_round(&mut self, state: &IterationState) -> SolverResult<Vector> {
        let blocks = &self.blocks;
        let slots = &self.slots;

        self.pool.install(|| {
            blocks
                .par_iter()
                .enumerate()
                .try_for_each(|(worker, block)| -> SolverResult<()> {
                    let next = block.next_iterate(&state.x, state.tau)?;
                    let mut slots = slots.lock().map_err(|_| SolverError::Poisoned)?;
                    slots[worker] = Some(next);
                    Ok(())
                })
        })?;

        let mut slots = self.slots.lock().map_err(|_| SolverError::Poisoned)?;
        let mut merged = Vector::default();
        for (worker, slot) in slots.iter_mut().enumerate() {
            let block = slot.take().ok_or(SolverError::MissingBlock(worker))?;
            merged.concatenate(&block);
        }
        Ok(merged)
    }
}
