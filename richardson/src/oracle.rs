use linalg::{Matrix, Vector};

use crate::{LinearSystem, SolverResult};

/// Decides convergence from the relative residual `|A x - b| / |b|`.
///
/// Evaluated by the coordinator only, once per round, on the merged iterate.
#[derive(Debug, Clone)]
pub struct ConvergenceOracle<'a> {
    matrix: &'a Matrix,
    rhs: &'a Vector,
    rhs_norm: f64,
    epsilon: f64,
}

impl<'a> ConvergenceOracle<'a> {
    #[inline]
    pub fn new(system: &'a LinearSystem, epsilon: f64) -> Self {
        Self {
            matrix: system.matrix(),
            rhs: system.rhs(),
            rhs_norm: system.rhs().norm(),
            epsilon,
        }
    }

    /// `|A x - b| / |b|`, or the absolute residual `|A x|` when `b` is zero.
    pub fn relative_residual(&self, x: &Vector) -> SolverResult<f64> {
        let residual = self.matrix.multiply(x)?.subtract(self.rhs)?.norm();
        if self.rhs_norm == 0.0 {
            Ok(residual)
        } else {
            Ok(residual / self.rhs_norm)
        }
    }

    #[inline]
    pub fn is_converged(&self, relative_residual: f64) -> bool {
        relative_residual < self.epsilon
    }
}

/// Negate `tau` when the residual grew since the previous round, keep it otherwise.
#[inline]
pub fn adapt_step_size(tau: f64, previous_residual: f64, residual: f64) -> f64 {
    if residual > previous_residual {
        -tau
    } else {
        tau
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_residual() {
        let system = LinearSystem::benchmark(8);
        let oracle = ConvergenceOracle::new(&system, 1e-5);
        assert_eq!(oracle.relative_residual(&Vector::new(8)).unwrap(), 1.0);
        assert_eq!(
            oracle.relative_residual(&Vector::filled(8, 1.0)).unwrap(),
            0.0
        );
        assert!(oracle.relative_residual(&Vector::new(4)).is_err());
        assert!(oracle.is_converged(9e-6));
        assert!(!oracle.is_converged(1e-5));
    }

    #[test]
    fn test_zero_rhs_uses_absolute_residual() {
        let system = LinearSystem::new(Matrix::benchmark(2), Vector::new(2)).unwrap();
        let oracle = ConvergenceOracle::new(&system, 1e-5);
        let x = Vector::from(vec![1.0, 0.0]);
        // A x = [2, 1]
        assert_eq!(oracle.relative_residual(&x).unwrap(), 5.0_f64.sqrt());
    }

    #[test]
    fn test_adapt_step_size() {
        assert_eq!(adapt_step_size(0.1, 1.0, 0.5), 0.1);
        assert_eq!(adapt_step_size(0.1, 1.0, 1.0), 0.1);
        assert_eq!(adapt_step_size(0.1, 1.0, 1.5), -0.1);
        assert_eq!(adapt_step_size(-0.1, 1.0, 1.5), 0.1);
    }
}
