//! Fitness evaluation against the random baseline ("teach" mode)
//!
//! Level 2 - Phase-level implementation

use neurotac_core::{EngineError, Outcome, Player, Strategy};
use rayon::prelude::*;

use crate::config::EvalConfig;
use crate::game_runner::{GameOutcome, GameRunner};

/// Result of fitness evaluation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FitnessResult {
    /// Total wins
    pub wins: u32,
    /// Total losses
    pub losses: u32,
    /// Total draws
    pub draws: u32,
    /// Games lost by playing an illegal move
    pub illegal_moves: u32,
    /// Average game length in plies
    pub avg_plies: f32,
    /// Sum of teach scores over all sessions (higher = better)
    pub fitness_score: f32,
}

impl FitnessResult {
    /// Create empty result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total games played
    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws + self.illegal_moves
    }

    /// Win rate (wins / total games)
    pub fn win_rate(&self) -> f32 {
        let total = self.total_games();
        if total == 0 {
            0.0
        } else {
            self.wins as f32 / total as f32
        }
    }

    fn record(&mut self, game: &GameOutcome, seat: Player) {
        match game.outcome {
            Outcome::Win(p) if p == seat => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::IllegalMove(p) if p == seat => self.illegal_moves += 1,
            // the baseline only picks empty cells
            Outcome::IllegalMove(_) => {}
        }
        self.fitness_score += game.score(seat);
    }
}

/// Teach-mode fitness of one strategy
pub fn evaluate_strategy(
    strategy: &dyn Strategy,
    config: &EvalConfig,
    seed: u64,
) -> Result<FitnessResult, EngineError> {
    let mut runner = GameRunner::new(config.engine.clone(), config.scoring, seed);
    let mut result = FitnessResult::empty();
    let mut total_plies = 0u32;

    for _ in 0..config.sessions {
        let (as_first, as_second) = runner.teach_games(strategy)?;
        result.record(&as_first, Player::First);
        result.record(&as_second, Player::Second);
        total_plies += as_first.plies + as_second.plies;
    }

    let games = result.total_games();
    if games > 0 {
        result.avg_plies = total_plies as f32 / games as f32;
    }
    Ok(result)
}

/// Teach-mode fitness of a whole population (Level 2 phase)
///
/// Strategy `i` plays against a baseline seeded with `config.seed + i`, so
/// parallel and sequential evaluation agree.
pub fn evaluate_fitness<S: Strategy>(
    strategies: &[S],
    config: &EvalConfig,
) -> Result<Vec<FitnessResult>, EngineError> {
    config.validate()?;

    let evaluate = |(i, strategy): (usize, &S)| {
        evaluate_strategy(strategy, config, config.seed.wrapping_add(i as u64))
    };

    if config.parallel {
        strategies.par_iter().enumerate().map(evaluate).collect()
    } else {
        strategies.iter().enumerate().map(evaluate).collect()
    }
}
