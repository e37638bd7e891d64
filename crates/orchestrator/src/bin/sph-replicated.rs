//! Replicated-state driver for the 2D SPH dam-break simulation.
//!
//! Runs the rank-thread strategy; rank count follows `SPH_RANKS` and
//! defaults to all cores. Machine-read output on stdout, diagnostics on
//! stderr.

use std::time::Instant;

use clap::Parser;
use kernel::SimParams;
use orchestrator::{diagnostics, domain, replicated};

/// 2D SPH dam-break simulation, replicated-state parallel.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of particles
    #[arg(default_value_t = 500, value_parser = clap::value_parser!(u64).range(1..))]
    n_particles: u64,

    /// Number of timesteps
    #[arg(default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    nsteps: u64,

    /// JSON file overriding the built-in physics parameters
    #[arg(long, value_name = "FILE")]
    params: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(message) = run(&args) {
        eprintln!("{}", message);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let params = match &args.params {
        Some(path) => SimParams::load(path)?,
        None => SimParams::default(),
    };
    let ranks = resolve_ranks()?;

    let mut state = domain::spawn_dam_break(args.n_particles as usize, &params)?;

    let start = Instant::now();
    let report = replicated::run_replicated(&mut state, &params, args.nsteps, ranks)?;
    let elapsed = start.elapsed().as_secs_f64();

    tracing::info!("completed {} steps ({:.4} simulated time units)", report.steps, report.sim_time);
    println!("Average density: {:.6}", diagnostics::average_density(&state.density));
    println!("Elapsed time: {:.6}", elapsed);
    Ok(())
}

/// Rank count from `SPH_RANKS`, defaulting to the number of cores.
fn resolve_ranks() -> Result<usize, String> {
    match std::env::var("SPH_RANKS") {
        Ok(value) => {
            let ranks: usize = value
                .trim()
                .parse()
                .map_err(|_| format!("SPH_RANKS must be a positive integer, got '{}'", value))?;
            if ranks == 0 {
                return Err("SPH_RANKS must be at least 1".to_string());
            }
            Ok(ranks)
        }
        Err(std::env::VarError::NotPresent) => Ok(std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)),
        Err(std::env::VarError::NotUnicode(_)) => {
            Err("SPH_RANKS is not valid unicode".to_string())
        }
    }
}
