use linalg::{LinalgResult, Matrix, Partition, Vector};

use crate::{LinearSystem, SolverResult};

/// One Richardson step restricted to a row block:
/// `x_i - tau * (A_i * x - b_i)`.
///
/// `block` holds rows `[a, b)` of `A` with all columns, `local_x` and `local_b` the same rows of
/// `x` and `b`. The product needs the full `global_x` because every row touches every column.
pub fn richardson_step(
    block: &Matrix,
    local_x: &Vector,
    local_b: &Vector,
    global_x: &Vector,
    tau: f64,
) -> LinalgResult<Vector> {
    let residual = block.multiply(global_x)?.subtract(local_b)?;
    local_x.subtract(&residual.scale(tau))
}

/// The rows of `A` and `b` one worker owns. Built once before the first round.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalBlock {
    pub partition: Partition,
    pub matrix: Matrix,
    pub rhs: Vector,
}

impl LocalBlock {
    pub fn new(system: &LinearSystem, worker: usize, count: usize) -> SolverResult<Self> {
        let partition = Partition::new(system.size(), worker, count)?;
        Ok(Self {
            partition,
            matrix: system.matrix().slice_rows(partition.start, partition.end)?,
            rhs: system.rhs().slice_range(partition.start, partition.end)?,
        })
    }

    /// This worker's rows of the next iterate, computed from the round-start `global_x`.
    #[inline]
    pub fn next_iterate(&self, global_x: &Vector, tau: f64) -> SolverResult<Vector> {
        let local_x = global_x.slice_range(self.partition.start, self.partition.end)?;
        Ok(richardson_step(
            &self.matrix,
            &local_x,
            &self.rhs,
            global_x,
            tau,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_step_by_hand() {
        // A = [[2, 1], [1, 2]], b = [3, 3], x = [0, 0], tau = 0.5
        // residual = -b, next = 0 + 0.5 * b
        let system = LinearSystem::benchmark(2);
        let x = Vector::new(2);
        let full = system.local_block(0, 1).unwrap();
        assert_eq!(full.next_iterate(&x, 0.5).unwrap().as_slice(), &[1.5, 1.5]);

        let second = system.local_block(1, 2).unwrap();
        assert_eq!(second.partition.rows(), 1..2);
        assert_eq!(second.next_iterate(&x, 0.5).unwrap().as_slice(), &[1.5]);
    }

    #[test]
    fn test_blocks_reassemble_full_step() {
        let system = LinearSystem::benchmark(12);
        let x = Vector::filled(12, 0.3);
        let tau = 0.01;
        let full = system.local_block(0, 1).unwrap().next_iterate(&x, tau).unwrap();

        let mut merged = Vector::default();
        for block in system.local_blocks(4).unwrap() {
            merged.concatenate(&block.next_iterate(&x, tau).unwrap());
        }
        assert_eq!(merged, full);
    }

    #[test]
    fn test_fixed_point_is_the_solution() {
        let system = LinearSystem::benchmark(6);
        let ones = Vector::filled(6, 1.0);
        let block = system.local_block(0, 3).unwrap();
        assert_eq!(block.next_iterate(&ones, 0.1).unwrap(), Vector::filled(2, 1.0));
    }
}
