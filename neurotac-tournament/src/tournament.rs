//! Tournament execution - round robin across a population
//!
//! Level 1 - Orchestration and Level 2 - Phases

use neurotac_core::{EngineError, Strategy};
use rayon::prelude::*;

use crate::config::TournamentConfig;
use crate::game_runner::GameRunner;
use crate::match_play::{play_match, MatchResult};

/// Standing of a participant in the tournament
#[derive(Clone, Debug, Default)]
pub struct Standing {
    /// Index of the strategy in the input slice
    pub index: usize,
    /// Name of the strategy
    pub name: String,
    /// Total score over all games
    pub score: f32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Games lost by an illegal move
    pub illegal_moves: u32,
    /// Games ended by the opponent's illegal move (not counted as wins)
    pub opponent_illegal: u32,
    pub games_played: u32,
}

impl Standing {
    /// Win rate
    pub fn win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f32 / self.games_played as f32
        }
    }

    /// Average score per game
    pub fn normalized_score(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            self.score / self.games_played as f32
        }
    }
}

/// Result of a tournament
#[derive(Clone, Debug)]
pub struct TournamentResult {
    /// Final standings sorted by score (descending)
    pub standings: Vec<Standing>,
    /// Total score per strategy, in input order
    pub scores: Vec<f32>,
    /// Every pairing played, as (a, b, result)
    pub matches: Vec<(usize, usize, MatchResult)>,
}

impl TournamentResult {
    /// Get winner (top standing)
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Get top N performers
    pub fn top_n(&self, n: usize) -> &[Standing] {
        let n = n.min(self.standings.len());
        &self.standings[..n]
    }

    /// Get standing for a specific strategy index
    pub fn standing_for(&self, index: usize) -> Option<&Standing> {
        self.standings.iter().find(|s| s.index == index)
    }
}

// ============================================================================
// Level 1 - Orchestration
// ============================================================================

/// Run a round-robin tournament (Level 1 orchestration)
///
/// Every pair meets once (twice with `both_seats`). Strategies are checked
/// against the engine up front so a malformed one stops the run before any
/// game is played.
pub fn run_tournament<S: Strategy>(
    strategies: &[S],
    config: &TournamentConfig,
) -> Result<TournamentResult, EngineError> {
    config.validate()?;
    for strategy in strategies {
        config.engine.check_strategy(strategy)?;
    }

    let pairings = generate_round_robin_pairings(strategies.len());
    let matches = execute_all_matches(strategies, &pairings, config)?;
    let standings = compute_standings(strategies, &matches);

    let mut scores = vec![0.0; strategies.len()];
    for standing in &standings {
        scores[standing.index] = standing.score;
    }

    Ok(TournamentResult {
        standings,
        scores,
        matches,
    })
}

// ============================================================================
// Level 3 - Steps
// ============================================================================

/// Generate all (i, j) pairings with i < j
fn generate_round_robin_pairings(n: usize) -> Vec<(usize, usize)> {
    let mut pairings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairings.push((i, j));
        }
    }
    pairings
}

/// Play every pairing, each on its own runner
///
/// Pairing `k` is seeded with `config.seed + k`, so parallel and sequential
/// runs produce the same results.
fn execute_all_matches<S: Strategy>(
    strategies: &[S],
    pairings: &[(usize, usize)],
    config: &TournamentConfig,
) -> Result<Vec<(usize, usize, MatchResult)>, EngineError> {
    let play = |(k, &(i, j)): (usize, &(usize, usize))| {
        let mut runner = GameRunner::new(
            config.engine.clone(),
            config.scoring,
            config.seed.wrapping_add(k as u64),
        );
        play_match(&mut runner, &strategies[i], &strategies[j], config.both_seats)
            .map(|result| (i, j, result))
    };

    if config.parallel {
        pairings.par_iter().enumerate().map(play).collect()
    } else {
        pairings.iter().enumerate().map(play).collect()
    }
}

/// Fold match results into per-strategy standings
fn compute_standings<S: Strategy>(
    strategies: &[S],
    matches: &[(usize, usize, MatchResult)],
) -> Vec<Standing> {
    let mut standings: Vec<Standing> = strategies
        .iter()
        .enumerate()
        .map(|(index, s)| Standing {
            index,
            name: s.name().to_string(),
            ..Default::default()
        })
        .collect();

    for (i, j, result) in matches {
        let games = result.games_played();

        let a = &mut standings[*i];
        a.score += result.a_score;
        a.wins += result.a_wins;
        a.losses += result.b_wins;
        a.draws += result.draws;
        a.illegal_moves += result.a_illegal;
        a.opponent_illegal += result.b_illegal;
        a.games_played += games;

        let b = &mut standings[*j];
        b.score += result.b_score;
        b.wins += result.b_wins;
        b.losses += result.a_wins;
        b.draws += result.draws;
        b.illegal_moves += result.b_illegal;
        b.opponent_illegal += result.a_illegal;
        b.games_played += games;
    }

    standings.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    standings
}
