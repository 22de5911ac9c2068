use linalg::{LinalgError, Matrix, Vector};

use crate::{LocalBlock, SolverResult};

/// A square system `A * x = b`. Immutable once built, so any number of workers may read it
/// concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    matrix: Matrix,
    rhs: Vector,
}

impl LinearSystem {
    pub fn new(matrix: Matrix, rhs: Vector) -> SolverResult<Self> {
        if !matrix.is_square() {
            return Err(LinalgError::SizeMismatch {
                left: matrix.rows(),
                right: matrix.columns(),
            }
            .into());
        }
        if rhs.len() != matrix.rows() {
            return Err(LinalgError::SizeMismatch {
                left: matrix.rows(),
                right: rhs.len(),
            }
            .into());
        }
        Ok(Self { matrix, rhs })
    }

    /// The `n x n` benchmark system: 2 on the diagonal, 1 elsewhere, every `b_i = n + 1`.
    /// Its exact solution is the all-ones vector.
    pub fn benchmark(n: usize) -> Self {
        let mut rhs = Vector::new(n);
        rhs.fill();
        Self {
            matrix: Matrix::benchmark(n),
            rhs,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rhs.len()
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    #[inline]
    pub fn rhs(&self) -> &Vector {
        &self.rhs
    }

    #[inline]
    pub fn local_block(&self, worker: usize, count: usize) -> SolverResult<LocalBlock> {
        LocalBlock::new(self, worker, count)
    }

    /// Blocks for all `count` workers in worker order.
    pub fn local_blocks(&self, count: usize) -> SolverResult<Vec<LocalBlock>> {
        (0..count)
            .map(|worker| self.local_block(worker, count))
            .collect()
    }
}
