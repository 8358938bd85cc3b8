//! aura-sim - Run a batch of trials for a build and print the summary as JSON

use clap::Parser;
use sim_core::{default_config, load_sim_config, run_batch, BatchOptions, SimConfig, SimError, Simulation};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aura-sim", version, about = "Simulate a warlock build over many trials")]
struct Args {
    /// Build file (TOML); the bundled default build is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the number of trials
    #[arg(short, long)]
    iterations: Option<u32>,

    /// Override the base seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Include the first trial's combat log in the output
    #[arg(long)]
    combat_log: bool,

    /// Run trials on a single thread
    #[arg(long)]
    sequential: bool,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<SimConfig, SimError> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading build");
            load_sim_config(path)?
        }
        None => default_config()?,
    };
    if let Some(iterations) = args.iterations {
        config.settings.iterations = iterations;
    }
    if let Some(seed) = args.seed {
        config.settings.seed = seed;
    }
    config.settings.combat_log |= args.combat_log;
    config.settings.parallel &= !args.sequential;
    Ok(config)
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = load_config(args)?;
    let options = BatchOptions::from(&config.settings);
    let sim = Simulation::new(config)?;

    let summary = run_batch(&sim, &options, None);
    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| SimError::Invariant(format!("failed to serialize summary: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Simulation failed");
            ExitCode::FAILURE
        }
    }
}
