use std::fmt::Debug;

use mpi::{environment::Universe, topology::SimpleCommunicator, traits::*};

use crate::{CommError, CommResult, SolverComm, Tag};

/// [`SolverComm`] over `MPI_COMM_WORLD`.
///
/// Sends and receives are plain blocking MPI calls with no timeout: a rank waiting on a peer
/// that never sends blocks forever. The environment is finalized when the communicator is
/// dropped.
pub struct MPICommunicator {
    // declared before `universe` so the world handle is released before MPI_Finalize
    world: SimpleCommunicator,
    universe: Universe,
    world_size: usize,
    world_rank: usize,
}

impl Debug for MPICommunicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MPICommunicator")
            .field("buffer_size", &self.universe.buffer_size())
            .field("world_size", &self.world_size)
            .field("world_rank", &self.world_rank)
            .finish()
    }
}

impl MPICommunicator {
    /// Initialize MPI and bind to the world communicator.
    ///
    /// Fails if MPI was already initialized in this process.
    pub fn new() -> CommResult<Self> {
        let universe = mpi::initialize().ok_or(CommError::AlreadyInitialized)?;
        let world = universe.world();
        let world_size = world.size() as usize;
        let world_rank = world.rank() as usize;
        Ok(Self {
            world,
            universe,
            world_size,
            world_rank,
        })
    }

    /// Finalize the MPI environment
    #[inline]
    pub fn finalize(self) {
        drop(self)
    }

    #[inline]
    fn peer(&self, rank: usize) -> CommResult<mpi::topology::Process<'_>> {
        if rank >= self.world_size {
            return Err(CommError::RankOutOfRange {
                rank,
                size: self.world_size,
            });
        }
        if rank == self.world_rank {
            return Err(CommError::SelfMessage { rank });
        }
        Ok(self.world.process_at_rank(rank as i32))
    }
}

impl SolverComm for MPICommunicator {
    #[inline]
    fn world_size(&self) -> usize {
        self.world_size
    }

    #[inline]
    fn world_rank(&self) -> usize {
        self.world_rank
    }

    fn send_vec(&self, dest: usize, tag: Tag, data: &[f64]) -> CommResult<()> {
        self.peer(dest)?.send_with_tag(data, tag.id());
        Ok(())
    }

    fn recv_vec(&self, source: usize, tag: Tag, len: usize) -> CommResult<Vec<f64>> {
        let (data, _status) = self.peer(source)?.receive_vec_with_tag::<f64>(tag.id());
        if data.len() != len {
            return Err(CommError::LengthMismatch {
                expected: len,
                actual: data.len(),
            });
        }
        Ok(data)
    }

    // flags travel as a single byte
    fn send_flag(&self, dest: usize, tag: Tag, flag: bool) -> CommResult<()> {
        self.peer(dest)?.send_with_tag(&u8::from(flag), tag.id());
        Ok(())
    }

    fn recv_flag(&self, source: usize, tag: Tag) -> CommResult<bool> {
        let (byte, _status) = self.peer(source)?.receive_with_tag::<u8>(tag.id());
        Ok(byte != 0)
    }

    fn send_f64(&self, dest: usize, tag: Tag, value: f64) -> CommResult<()> {
        self.peer(dest)?.send_with_tag(&value, tag.id());
        Ok(())
    }

    fn recv_f64(&self, source: usize, tag: Tag) -> CommResult<f64> {
        let (value, _status) = self.peer(source)?.receive_with_tag::<f64>(tag.id());
        Ok(value)
    }

    #[inline]
    fn barrier(&self) -> CommResult<()> {
        self.world.barrier();
        Ok(())
    }
}
