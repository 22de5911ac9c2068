use crate::{CommResult, Tag};

/// Blocking, tagged point-to-point messaging between the ranks of a fixed-size world.
///
/// Every receive blocks until the matching message arrives. Rank
/// [`SolverComm::ROOT_RANK`] coordinates; every other rank is a plain worker.
pub trait SolverComm {
    const ROOT_RANK: usize = 0;

    /// Number of ranks in the world
    fn world_size(&self) -> usize;

    /// Rank of the caller
    fn world_rank(&self) -> usize;

    #[inline(always)]
    fn is_root(&self) -> bool {
        self.world_rank() == Self::ROOT_RANK
    }

    #[inline(always)]
    fn is_single_process(&self) -> bool {
        self.world_size() == 1
    }

    /// Send a fixed-length buffer to `dest`
    fn send_vec(&self, dest: usize, tag: Tag, data: &[f64]) -> CommResult<()>;

    /// Receive a buffer of exactly `len` values from `source`
    fn recv_vec(&self, source: usize, tag: Tag, len: usize) -> CommResult<Vec<f64>>;

    fn send_flag(&self, dest: usize, tag: Tag, flag: bool) -> CommResult<()>;

    fn recv_flag(&self, source: usize, tag: Tag) -> CommResult<bool>;

    fn send_f64(&self, dest: usize, tag: Tag, value: f64) -> CommResult<()>;

    fn recv_f64(&self, source: usize, tag: Tag) -> CommResult<f64>;

    /// Barrier for all the ranks
    fn barrier(&self) -> CommResult<()>;
}
