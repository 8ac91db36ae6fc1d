//! Match command - play saved strategies against each other
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_contenders(), play_rounds(), report_results()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use neurotac_evolve::Network;
use neurotac_tournament::{play_match, GameRunner, MatchResult};

use crate::args::{load_network, EngineArgs, NetworkArgs, ScoringArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Batch file holding strategy A
    #[arg(long, value_name = "FILE")]
    pub a: PathBuf,

    /// Name or index of strategy A within its batch
    #[arg(long, default_value = "0")]
    pub a_pick: String,

    /// Batch file holding strategy B
    #[arg(long, value_name = "FILE")]
    pub b: PathBuf,

    /// Name or index of strategy B within its batch
    #[arg(long, default_value = "0")]
    pub b_pick: String,

    /// Rounds to play; each round is one game per seat order
    #[arg(long, default_value = "1")]
    pub rounds: usize,

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

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Load both strategies
/// 2. Play every round in both seat orders
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let engine = args.engine.to_config()?;
    let scoring = args.scoring.to_config()?;
    let (a, b) = load_contenders(&args, &args.network.layers(&engine))?;

    tracing::info!("Starting match: {} vs {} ({} rounds)", a.name, b.name, args.rounds);

    let mut runner = GameRunner::new(engine, scoring, seed.unwrap_or(42));
    let result = play_rounds(&mut runner, &a, &b, args.rounds)?;

    report_results(&a, &b, &result, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_contenders(args: &MatchArgs, layers: &[usize]) -> Result<(Network, Network)> {
    let a = load_network(&args.a, &args.a_pick, layers)?;
    let b = load_network(&args.b, &args.b_pick, layers)?;
    Ok((a, b))
}

/// Play `rounds` two-game matches and merge them
fn play_rounds(runner: &mut GameRunner, a: &Network, b: &Network, rounds: usize) -> Result<MatchResult> {
    let mut total = MatchResult::empty();
    for round in 0..rounds {
        let result = play_match(runner, a, b, true)?;
        tracing::debug!(
            "Round {}: {} {:.2} - {:.2} {}",
            round + 1,
            a.name,
            result.a_score,
            result.b_score,
            b.name
        );
        merge(&mut total, result);
    }
    Ok(total)
}

fn report_results(a: &Network, b: &Network, result: &MatchResult, json: bool) -> Result<()> {
    if json {
        print_json_results(a, b, result)
    } else {
        print_text_results(a, b, result);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn merge(total: &mut MatchResult, result: MatchResult) {
    total.a_score += result.a_score;
    total.b_score += result.b_score;
    total.a_wins += result.a_wins;
    total.b_wins += result.b_wins;
    total.draws += result.draws;
    total.a_illegal += result.a_illegal;
    total.b_illegal += result.b_illegal;
    total.games.extend(result.games);
}

fn print_text_results(a: &Network, b: &Network, result: &MatchResult) {
    println!("\n=== Match Results ===");
    println!("Games:   {}", result.games_played());
    println!("{:<24} score {:>7.2}  wins {:>3}  illegal {:>3}", a.name, result.a_score, result.a_wins, result.a_illegal);
    println!("{:<24} score {:>7.2}  wins {:>3}  illegal {:>3}", b.name, result.b_score, result.b_wins, result.b_illegal);
    println!("Draws:   {}", result.draws);
    println!("Avg length: {:.1} plies", result.avg_plies());
}

fn print_json_results(a: &Network, b: &Network, result: &MatchResult) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        outcome: String,
        plies: u32,
        moves: Vec<usize>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        a: &'a str,
        b: &'a str,
        a_score: f32,
        b_score: f32,
        a_wins: u32,
        b_wins: u32,
        draws: u32,
        a_illegal: u32,
        b_illegal: u32,
        avg_plies: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        a: &a.name,
        b: &b.name,
        a_score: result.a_score,
        b_score: result.b_score,
        a_wins: result.a_wins,
        b_wins: result.b_wins,
        draws: result.draws,
        a_illegal: result.a_illegal,
        b_illegal: result.b_illegal,
        avg_plies: result.avg_plies(),
        games: result
            .games
            .iter()
            .map(|g| JsonGame {
                outcome: format!("{:?}", g.outcome),
                plies: g.plies,
                moves: g.moves.clone(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
