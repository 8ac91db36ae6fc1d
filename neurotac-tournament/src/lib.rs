//! NEUROTAC Tournament - Fitness evaluation through game playing
//!
//! This crate provides the combat and scoring protocol:
//! - Single games between strategies or against a random baseline
//! - Outcome scoring with illegal-move penalties
//! - Teach-mode fitness (one game per seat against the baseline)
//! - Round-robin tournaments across a population
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_tournament (orchestration)
//! - Level 2: evaluate_fitness, play_match (phases)
//! - Level 3: GameRunner::play_game, scoring (steps)
//! - Level 4: configuration

mod config;
mod fitness;
mod game_runner;
mod match_play;
mod scoring;
mod tournament;

#[cfg(test)]
mod testing;

pub use config::{EvalConfig, TournamentConfig};
pub use fitness::{evaluate_fitness, evaluate_strategy, FitnessResult};
pub use game_runner::{Contender, GameOutcome, GameRunner};
pub use match_play::{play_match, MatchResult};
pub use scoring::ScoringConfig;
pub use tournament::{run_tournament, Standing, TournamentResult};
