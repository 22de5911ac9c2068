use std::thread;

use communicator::{ChannelCommunicator, SolverComm};
use linalg::Vector;

use crate::{
    adapt_step_size,
    strategy::{MessagePassing, Serial, SharedMemory, SyncStrategy},
    ConvergenceOracle, IterationState, LinearSystem, RoundOutcome, Solution, SolverConfig,
    SolverError, SolverResult,
};

/// Coordinator-only bookkeeping: convergence check, step-size adaptation and history.
#[derive(Debug)]
pub struct Coordinator<'a> {
    oracle: ConvergenceOracle<'a>,
    max_rounds: Option<usize>,
    previous_residual: f64,
    sign_flips: usize,
    history: Vec<f64>,
}

impl<'a> Coordinator<'a> {
    pub fn new(
        system: &'a LinearSystem,
        config: &SolverConfig,
        initial_x: &Vector,
    ) -> SolverResult<Self> {
        let oracle = ConvergenceOracle::new(system, config.epsilon);
        let previous_residual = oracle.relative_residual(initial_x)?;
        Ok(Self {
            oracle,
            max_rounds: config.max_rounds,
            previous_residual,
            sign_flips: 0,
            history: vec![],
        })
    }

    /// `CONVERGENCE_CHECK`: install the merged iterate, decide whether to stop and, if not,
    /// adapt the step size for the next round.
    pub fn conclude_round(
        &mut self,
        state: &mut IterationState,
        merged: Vector,
    ) -> SolverResult<RoundOutcome> {
        let residual = self.oracle.relative_residual(&merged)?;
        state.x = merged;
        state.round += 1;
        self.history.push(residual);
        log::debug!(
            "round {}: relative residual {:e}, tau {:e}",
            state.round,
            residual,
            state.tau
        );

        let outcome = if self.oracle.is_converged(residual) {
            RoundOutcome::Converged
        } else if self.max_rounds.is_some_and(|max| state.round >= max) {
            RoundOutcome::Exhausted
        } else {
            let tau = adapt_step_size(state.tau, self.previous_residual, residual);
            if tau != state.tau {
                log::warn!(
                    "round {}: residual grew from {:e} to {:e}, flipping tau to {:e}",
                    state.round,
                    self.previous_residual,
                    residual,
                    tau
                );
                self.sign_flips += 1;
                state.tau = tau;
            }
            RoundOutcome::Continue
        };
        self.previous_residual = residual;
        Ok(outcome)
    }

    #[inline]
    pub fn residual(&self) -> f64 {
        self.previous_residual
    }

    pub fn into_solution(self, state: IterationState) -> Solution {
        Solution {
            x: state.x,
            rounds: state.round,
            residual: self.previous_residual,
            tau: state.tau,
            sign_flips: self.sign_flips,
            residual_history: self.history,
        }
    }
}

/// Run the iteration on one participant of `strategy`.
///
/// Returns the solution on the coordinator and `None` on plain workers, which never evaluate
/// convergence themselves.
pub fn solve<S: SyncStrategy>(
    strategy: &mut S,
    system: &LinearSystem,
    config: &SolverConfig,
) -> SolverResult<Option<Solution>> {
    config.validate(system.size(), strategy.workers())?;
    if strategy.is_coordinator() {
        coordinate(strategy, system, config).map(Some)
    } else {
        follow(strategy, system, config).map(|_| None)
    }
}

fn coordinate<S: SyncStrategy>(
    strategy: &mut S,
    system: &LinearSystem,
    config: &SolverConfig,
) -> SolverResult<Solution> {
    let n = system.size();
    let mut state = IterationState::initial(n, config.initial_tau_for(n));
    let mut coordinator = Coordinator::new(system, config, &state.x)?;
    log::info!(
        "{} strategy: n = {}, workers = {}, tau = {:e}, epsilon = {:e}",
        S::NAME,
        n,
        strategy.workers(),
        state.tau,
        config.epsilon
    );

    loop {
        let merged = strategy.merge_round(&state)?;
        let outcome = coordinator.conclude_round(&mut state, merged)?;
        strategy.distribute(&state, outcome.is_terminal())?;

        match outcome {
            RoundOutcome::Continue => {}
            RoundOutcome::Converged => {
                log::info!(
                    "converged after {} rounds, relative residual {:e}",
                    state.round,
                    coordinator.residual()
                );
                return Ok(coordinator.into_solution(state));
            }
            RoundOutcome::Exhausted => {
                return Err(SolverError::NotConverged {
                    rounds: state.round,
                    residual: coordinator.residual(),
                })
            }
        }
    }
}

fn follow<S: SyncStrategy>(
    strategy: &mut S,
    system: &LinearSystem,
    config: &SolverConfig,
) -> SolverResult<()> {
    let n = system.size();
    let mut state = IterationState::initial(n, config.initial_tau_for(n));
    loop {
        strategy.contribute(&state)?;
        if !strategy.receive(&mut state)? {
            log::debug!("worker terminated after {} rounds", state.round + 1);
            return Ok(());
        }
    }
}

/// Single worker, no parallelism.
pub fn solve_serial(system: &LinearSystem, config: &SolverConfig) -> SolverResult<Solution> {
    config.validate(system.size(), 1)?;
    let mut strategy = Serial::new(system)?;
    coordinate(&mut strategy, system, config)
}

/// `config.workers` threads sharing the iterate.
pub fn solve_shared_memory(
    system: &LinearSystem,
    config: &SolverConfig,
) -> SolverResult<Solution> {
    config.validate(system.size(), config.workers)?;
    let mut strategy = SharedMemory::new(system, config.workers)?;
    coordinate(&mut strategy, system, config)
}

/// Message passing over `comm`; every rank of the world must call this.
///
/// The worker count is the world size. Returns the solution on the root rank only.
pub fn solve_message_passing<C: SolverComm>(
    comm: &C,
    system: &LinearSystem,
    config: &SolverConfig,
) -> SolverResult<Option<Solution>> {
    if comm.is_root() && config.workers != comm.world_size() {
        log::warn!(
            "configured {} workers but the world has {} ranks; using the world size",
            config.workers,
            comm.world_size()
        );
    }
    config.validate(system.size(), comm.world_size())?;
    let mut strategy = MessagePassing::new(comm, system)?;
    solve(&mut strategy, system, config)
}

/// Message passing with one thread per rank inside this process, `config.workers` ranks.
pub fn solve_with_channels(
    system: &LinearSystem,
    config: &SolverConfig,
) -> SolverResult<Solution> {
    config.validate(system.size(), config.workers)?;
    let world = ChannelCommunicator::world(config.workers);

    let results = thread::scope(|scope| {
        let handles = world
            .into_iter()
            .map(|comm| scope.spawn(move || solve_message_passing(&comm, system, config)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .enumerate()
            .map(|(rank, handle)| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(SolverError::WorkerPanicked { rank }))
            })
            .collect::<Vec<_>>()
    });

    let mut solution = None;
    let mut errors = vec![];
    for result in results {
        match result {
            Ok(Some(s)) => solution = Some(s),
            Ok(None) => {}
            Err(e) => errors.push(e),
        }
    }

    // a failing rank hangs up on its peers; report the root cause over the resulting
    // disconnects
    errors.sort_by_key(|e| matches!(e, SolverError::Comm(_)));
    match errors.into_iter().next() {
        Some(e) => Err(e),
        None => solution.ok_or(SolverError::MissingBlock(0)),
    }
}
