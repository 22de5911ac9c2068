use std::ops::Range;

use crate::{LinalgError, LinalgResult};

/// A contiguous block of rows owned by one worker.
///
/// Block `worker` of `count` covers rows `[worker * size / count, (worker + 1) * size / count)`.
/// `size` must be a multiple of `count`; uneven splits are rejected rather than truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub worker: usize,
    pub count: usize,
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub fn new(size: usize, worker: usize, count: usize) -> LinalgResult<Self> {
        if count == 0 || size % count != 0 {
            return Err(LinalgError::UnevenPartition { size, count });
        }
        if worker >= count {
            return Err(LinalgError::WorkerOutOfRange { worker, count });
        }

        let block = size / count;
        Ok(Self {
            worker,
            count,
            start: worker * block,
            end: (worker + 1) * block,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// All blocks of a `size`-row object in worker order.
pub fn partitions(size: usize, count: usize) -> LinalgResult<Vec<Partition>> {
    (0..count)
        .map(|worker| Partition::new(size, worker, count))
        .collect()
}
