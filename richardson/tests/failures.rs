use communicator::{ChannelCommunicator, CommError};
use linalg::{LinalgError, Matrix, Vector};
use richardson::{
    solve_message_passing, solve_serial, solve_shared_memory, solve_with_channels, LinearSystem,
    SolverConfig, SolverError,
};

#[test]
fn test_uneven_partition_fails_fast() {
    let system = LinearSystem::benchmark(10);
    let config = SolverConfig::new(4);
    assert!(matches!(
        solve_shared_memory(&system, &config),
        Err(SolverError::Config(_))
    ));
    assert!(matches!(
        solve_with_channels(&system, &config),
        Err(SolverError::Config(_))
    ));
    assert!(matches!(
        solve_shared_memory(&system, &SolverConfig::new(0)),
        Err(SolverError::Config(_))
    ));
}

#[test]
fn test_mismatched_system_is_rejected() {
    assert!(matches!(
        LinearSystem::new(Matrix::new(3, 4), Vector::new(3)),
        Err(SolverError::Linalg(LinalgError::SizeMismatch { left: 3, right: 4 }))
    ));
    assert!(matches!(
        LinearSystem::new(Matrix::benchmark(3), Vector::new(4)),
        Err(SolverError::Linalg(LinalgError::SizeMismatch { left: 3, right: 4 }))
    ));
}

// tau = 1 gives an amplification factor of |1 - 9 tau| = 8 (or 10 once flipped) on the
// benchmark system, so only the round cap stops it.
#[test]
fn test_round_cap_reports_non_convergence() {
    let system = LinearSystem::benchmark(8);
    let config = SolverConfig::new(2)
        .with_initial_tau(Some(1.0))
        .with_max_rounds(Some(25));

    for result in [
        solve_serial(&system, &config),
        solve_shared_memory(&system, &config),
        solve_with_channels(&system, &config),
    ] {
        match result {
            Err(SolverError::NotConverged { rounds, residual }) => {
                assert_eq!(rounds, 25);
                assert!(residual > 1.0);
            }
            other => panic!("expected NotConverged, got {other:?}"),
        }
    }
}

#[test]
fn test_round_cap_not_hit_when_converging() {
    let system = LinearSystem::benchmark(8);
    let config = SolverConfig::new(4).with_max_rounds(Some(97));
    assert_eq!(solve_with_channels(&system, &config).unwrap().rounds, 97);
}

#[test]
fn test_root_reports_vanished_worker() {
    let system = LinearSystem::benchmark(8);
    let config = SolverConfig::new(2);
    let mut world = ChannelCommunicator::world(2);
    drop(world.pop());

    assert!(matches!(
        solve_message_passing(&world[0], &system, &config),
        Err(SolverError::Comm(CommError::Disconnected { peer: 1 }))
    ));
}

#[test]
fn test_worker_reports_vanished_root() {
    let system = LinearSystem::benchmark(8);
    let config = SolverConfig::new(2);
    let mut world = ChannelCommunicator::world(2);
    let worker = world.pop().unwrap();
    drop(world);

    assert!(matches!(
        solve_message_passing(&worker, &system, &config),
        Err(SolverError::Comm(CommError::Disconnected { peer: 0 }))
    ));
}
