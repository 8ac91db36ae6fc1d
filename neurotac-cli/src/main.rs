//! NEUROTAC CLI - Command-line interface
//!
//! Commands:
//! - evolve: Breed strategies by neuro-evolution
//! - match: Play two saved strategies against each other
//! - teach: Score saved strategies against the random baseline
//! - play: Play a saved strategy yourself

mod args;
mod evolve;
mod match_cmd;
mod play;
mod teach_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neurotac")]
#[command(about = "Generate tic tac toe strategies using neuro-evolution")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Breed strategies by neuro-evolution
    Evolve(evolve::EvolveArgs),
    /// Play two saved strategies against each other
    Match(match_cmd::MatchArgs),
    /// Score saved strategies against the random baseline
    Teach(teach_cmd::TeachArgs),
    /// Play a saved strategy (or the random baseline) yourself
    Play(play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_ref())?;

    match cli.command {
        Commands::Evolve(args) => evolve::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Teach(args) => teach_cmd::run(args, cli.seed),
        Commands::Play(args) => play::run(args, cli.seed),
    }
}

fn init_logging(verbose: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

/// Create RNG from seed or random
pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
