use linalg::Vector;

/// Per-round state every worker holds at `ROUND_START`: the authoritative iterate and step
/// size from the last distribute step.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationState {
    pub x: Vector,
    pub tau: f64,
    /// Completed rounds
    pub round: usize,
}

impl IterationState {
    /// Round 0: the zero vector and the configured step size.
    #[inline]
    pub fn initial(n: usize, tau: f64) -> Self {
        Self {
            x: Vector::new(n),
            tau,
            round: 0,
        }
    }
}

/// The coordinator's verdict at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    Converged,
    /// The round cap was reached before convergence.
    Exhausted,
}

impl RoundOutcome {
    /// Whether workers must stop after this round.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, RoundOutcome::Continue)
    }
}

/// What the coordinator reports once the iteration has converged.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub x: Vector,
    pub rounds: usize,
    /// Relative residual of `x`
    pub residual: f64,
    /// Step size in effect during the last round
    pub tau: f64,
    pub sign_flips: usize,
    /// Relative residual after each round, in order
    pub residual_history: Vec<f64>,
}
