//! Teach command - score saved strategies against the random baseline

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;

use neurotac_evolve::Network;
use neurotac_tournament::{evaluate_fitness, EvalConfig, FitnessResult};

use crate::args::{load_networks, EngineArgs, NetworkArgs, ScoringArgs};

#[derive(Args)]
pub struct TeachArgs {
    /// Batch files to evaluate (repeatable)
    #[arg(short = 'f', long = "file", value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Baseline sessions per strategy; each is one game per seat
    #[arg(long, default_value = "10")]
    pub sessions: usize,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: TeachArgs, seed: Option<u64>) -> Result<()> {
    let engine = args.engine.to_config()?;
    let layers = args.network.layers(&engine);

    let mut networks: Vec<Network> = Vec::new();
    for path in &args.files {
        networks.extend(load_networks(path, &layers)?);
    }
    if networks.is_empty() {
        bail!("No strategies with layers {:?} found", layers);
    }

    let mut config = EvalConfig::new(args.sessions)
        .with_engine(engine)
        .with_scoring(args.scoring.to_config()?);
    config.seed = seed.unwrap_or(42);

    tracing::info!("Teaching {} strategies over {} sessions", networks.len(), args.sessions);
    let results = evaluate_fitness(&networks, &config)?;

    let mut ranked: Vec<(&Network, &FitnessResult)> = networks.iter().zip(&results).collect();
    ranked.sort_by(|a, b| {
        b.1.fitness_score
            .partial_cmp(&a.1.fitness_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if args.json {
        print_json_results(&ranked)
    } else {
        print_text_results(&ranked);
        Ok(())
    }
}

fn print_text_results(ranked: &[(&Network, &FitnessResult)]) {
    println!("\n=== Teach Results ===");
    println!("{:<24} {:>8} {:>5} {:>5} {:>5} {:>7}", "strategy", "fitness", "W", "L", "D", "illegal");
    for (network, r) in ranked {
        println!(
            "{:<24} {:>8.3} {:>5} {:>5} {:>5} {:>7}",
            network.name, r.fitness_score, r.wins, r.losses, r.draws, r.illegal_moves
        );
    }
}

fn print_json_results(ranked: &[(&Network, &FitnessResult)]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonRow<'a> {
        name: &'a str,
        fitness: f32,
        wins: u32,
        losses: u32,
        draws: u32,
        illegal_moves: u32,
        win_rate: f32,
        avg_plies: f32,
    }

    let rows: Vec<JsonRow> = ranked
        .iter()
        .map(|(n, r)| JsonRow {
            name: &n.name,
            fitness: r.fitness_score,
            wins: r.wins,
            losses: r.losses,
            draws: r.draws,
            illegal_moves: r.illegal_moves,
            win_rate: r.win_rate(),
            avg_plies: r.avg_plies,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
