use linalg::Vector;
use richardson::{
    solve_serial, solve_shared_memory, solve_with_channels, LinearSystem, Solution, SolverConfig,
};

const PARITY_TOLERANCE: f64 = 1e-4;
const INVARIANCE_TOLERANCE: f64 = 1e-12;

fn max_abs_diff(a: &Vector, b: &Vector) -> f64 {
    assert_eq!(a.len(), b.len());
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

fn assert_same_trajectory(reference: &Solution, other: &Solution) {
    assert_eq!(reference.rounds, other.rounds);
    assert_eq!(reference.sign_flips, other.sign_flips);
    assert!(max_abs_diff(&reference.x, &other.x) < INVARIANCE_TOLERANCE);
}

#[test]
fn test_message_passing_matches_shared_memory() {
    let system = LinearSystem::benchmark(8);
    let config = SolverConfig::new(2);

    let shared = solve_shared_memory(&system, &config).unwrap();
    let channel = solve_with_channels(&system, &config).unwrap();
    assert!(max_abs_diff(&shared.x, &channel.x) < PARITY_TOLERANCE);
    assert_eq!(shared.rounds, channel.rounds);
}

#[test]
fn test_worker_count_invariance() {
    let system = LinearSystem::benchmark(8);
    let serial = solve_serial(&system, &SolverConfig::default()).unwrap();

    for workers in [1, 2, 4] {
        let config = SolverConfig::new(workers);
        assert_same_trajectory(&serial, &solve_shared_memory(&system, &config).unwrap());
        assert_same_trajectory(&serial, &solve_with_channels(&system, &config).unwrap());
    }
}

#[test]
fn test_worker_count_invariance_larger_system() {
    let system = LinearSystem::benchmark(48);
    let reference = solve_shared_memory(&system, &SolverConfig::new(1)).unwrap();

    for workers in [2, 3, 6, 16] {
        let config = SolverConfig::new(workers);
        assert_same_trajectory(&reference, &solve_shared_memory(&system, &config).unwrap());
        assert_same_trajectory(&reference, &solve_with_channels(&system, &config).unwrap());
    }
}
