use std::process::exit;

use clap::Parser;
use communicator::{root_println, MPICommunicator, SolverComm};
use richardson::{
    solve_message_passing, LinearSystem, SolverConfig, SolverResult, DEFAULT_EPSILON,
};
use utils::timer::Timer;

/// Message-passing solve of the benchmark system; launch with `mpiexec -n <workers>`.
/// The root rank prints the elapsed solve time in seconds.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Problem size N, must be divisible by the number of ranks
    #[arg(short = 'n', long, default_value_t = 2048)]
    size: usize,

    /// Stop once the relative residual drops below this
    #[arg(short, long, default_value_t = DEFAULT_EPSILON)]
    epsilon: f64,

    /// Initial step size, 0.1 / N when omitted
    #[arg(long)]
    tau: Option<f64>,

    /// Give up after this many rounds
    #[arg(long)]
    max_rounds: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let comm = match MPICommunicator::new() {
        Ok(comm) => comm,
        Err(e) => {
            eprintln!("error: {e}");
            exit(1);
        }
    };

    let result = run(&comm, &args);
    let rank = comm.world_rank();
    comm.finalize();

    if let Err(e) = result {
        eprintln!("error on rank {rank}: {e}");
        exit(1);
    }
}

fn run(comm: &MPICommunicator, args: &Args) -> SolverResult<()> {
    let config = SolverConfig::new(comm.world_size())
        .with_epsilon(args.epsilon)
        .with_initial_tau(args.tau)
        .with_max_rounds(args.max_rounds);
    config.validate(args.size, comm.world_size())?;

    let system = LinearSystem::benchmark(args.size);

    comm.barrier()?; // wait until everyone is here
    let timer = Timer::new("message-passing solve", comm.is_root());
    let solution = solve_message_passing(comm, &system, &config)?;
    let elapsed = timer.stop();

    if let Some(solution) = solution {
        log::info!(
            "{} rounds, relative residual {:e}, {} step-size flips",
            solution.rounds,
            solution.residual,
            solution.sign_flips
        );
    }
    root_println!(comm, "{}", elapsed.as_secs_f64());
    Ok(())
}
