use linalg::Vector;
use richardson::{
    solve_serial, solve_shared_memory, solve_with_channels, ConvergenceOracle, LinearSystem,
    Solution, SolverConfig, DEFAULT_EPSILON,
};

const N: usize = 8;

fn assert_converged(system: &LinearSystem, solution: &Solution) {
    let oracle = ConvergenceOracle::new(system, DEFAULT_EPSILON);
    let residual = oracle.relative_residual(&solution.x).unwrap();
    assert!(residual < DEFAULT_EPSILON, "residual {residual:e}");
    assert_eq!(residual, solution.residual);
    assert_eq!(solution.residual_history.len(), solution.rounds);
    assert_eq!(solution.residual_history.last(), Some(&solution.residual));
}

#[test]
fn test_end_to_end_two_workers() {
    let system = LinearSystem::benchmark(N);
    assert_eq!(system.rhs(), &Vector::filled(N, 9.0));

    let config = SolverConfig::new(2);
    for solution in [
        solve_shared_memory(&system, &config).unwrap(),
        solve_with_channels(&system, &config).unwrap(),
    ] {
        assert_converged(&system, &solution);
        for v in solution.x.as_slice() {
            assert!((v - 1.0).abs() < 1e-4);
        }
    }
}

// From x0 = 0 the error is -1, an eigenvector of A = I + J with eigenvalue N + 1 = 9, so each
// round scales the relative residual by exactly 1 - 9 * tau = 0.8875 for tau = 0.1 / 8.
#[test]
fn test_residual_strictly_decreases() {
    let system = LinearSystem::benchmark(N);
    let solution = solve_serial(&system, &SolverConfig::default()).unwrap();
    assert_converged(&system, &solution);

    let mut previous = 1.0;
    for residual in &solution.residual_history {
        assert!(*residual < previous);
        assert!((residual / previous - 0.8875).abs() < 1e-6);
        previous = *residual;
    }

    // 0.8875^96 > 1e-5 > 0.8875^97
    assert_eq!(solution.rounds, 97);
    assert_eq!(solution.sign_flips, 0);
    assert_eq!(solution.tau, 0.1 / N as f64);
}

#[test]
fn test_negative_step_size_is_flipped() {
    let system = LinearSystem::benchmark(N);
    let config = SolverConfig::new(2).with_initial_tau(Some(-0.1 / N as f64));

    let shared = solve_shared_memory(&system, &config).unwrap();
    assert_converged(&system, &shared);
    assert_eq!(shared.sign_flips, 1);
    assert!(shared.residual_history[0] > 1.0);
    assert!(shared.tau > 0.0);

    let channel = solve_with_channels(&system, &config).unwrap();
    assert_eq!(channel.rounds, shared.rounds);
    assert_eq!(channel.sign_flips, 1);
}

#[test]
fn test_exact_start_converges_in_one_round() {
    // x0 = 0 already solves a zero right-hand side, the first round confirms it
    let system = LinearSystem::new(linalg::Matrix::benchmark(4), Vector::new(4)).unwrap();
    let solution = solve_serial(&system, &SolverConfig::default()).unwrap();
    assert_eq!(solution.rounds, 1);
    assert_eq!(solution.x, Vector::new(4));
    assert_eq!(solution.residual, 0.0);
}

#[test]
fn test_larger_system() {
    let system = LinearSystem::benchmark(64);
    let solution = solve_shared_memory(&system, &SolverConfig::new(8)).unwrap();
    assert_converged(&system, &solution);
}
