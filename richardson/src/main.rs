use std::{process::exit, str::FromStr};

use clap::Parser;
use richardson::{
    solve_serial, solve_shared_memory, solve_with_channels, LinearSystem, SolverConfig,
    SolverResult, StrategyKind, DEFAULT_EPSILON,
};
use utils::timer::Timer;

/// Solve the benchmark system (2 on the diagonal, 1 elsewhere, b = N + 1) by simple iteration
/// and print the elapsed solve time in seconds.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Problem size N, must be divisible by the worker count
    #[arg(short = 'n', long, default_value_t = 2048)]
    size: usize,

    /// number of workers
    #[arg(short, long, default_value_t = 16)]
    threads: usize,

    /// Synchronization strategy: shared, channel, serial
    #[arg(short, long, default_value_t = String::from("shared"))]
    strategy: String,

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

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        exit(1);
    }
}

fn run(args: &Args) -> SolverResult<()> {
    let strategy = StrategyKind::from_str(&args.strategy)?;
    let config = SolverConfig::new(args.threads)
        .with_epsilon(args.epsilon)
        .with_initial_tau(args.tau)
        .with_max_rounds(args.max_rounds);
    let workers = match strategy {
        StrategyKind::Serial => 1,
        _ => config.workers,
    };
    config.validate(args.size, workers)?;

    let system = LinearSystem::benchmark(args.size);

    let timer = Timer::new(&format!("{strategy} solve"), true);
    let solution = match strategy {
        StrategyKind::Serial => solve_serial(&system, &config),
        StrategyKind::SharedMemory => solve_shared_memory(&system, &config),
        StrategyKind::Channel => solve_with_channels(&system, &config),
    }?;
    let elapsed = timer.stop();

    log::info!(
        "{} rounds, relative residual {:e}, {} step-size flips",
        solution.rounds,
        solution.residual,
        solution.sign_flips
    );
    println!("{}", elapsed.as_secs_f64());
    Ok(())
}
