//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use neurotac_core::{EngineConfig, EngineError};
use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

/// Configuration for a round-robin tournament
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Move selection settings shared by every game
    pub engine: EngineConfig,
    /// Outcome scoring
    pub scoring: ScoringConfig,
    /// Play each pairing twice, once per seat order
    pub both_seats: bool,
    /// Whether to run pairings in parallel
    pub parallel: bool,
    /// Base seed (per-pairing seeds are derived from it)
    pub seed: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            scoring: ScoringConfig::default(),
            both_seats: true,
            parallel: true,
            seed: 42,
        }
    }
}

impl TournamentConfig {
    pub fn new(engine: EngineConfig) -> Self {
        Self {
            engine,
            ..Default::default()
        }
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.engine.validate()?;
        self.scoring.validate()
    }
}

/// Configuration for fitness evaluation against the random baseline
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    pub engine: EngineConfig,
    pub scoring: ScoringConfig,
    /// Teach sessions per strategy (each is one game per seat)
    pub sessions: usize,
    /// Whether to evaluate strategies in parallel
    pub parallel: bool,
    /// Base seed for the random baseline
    pub seed: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            scoring: ScoringConfig::default(),
            sessions: 1,
            parallel: true,
            seed: 42,
        }
    }
}

impl EvalConfig {
    /// Create config with the given number of teach sessions
    pub fn new(sessions: usize) -> Self {
        Self {
            sessions,
            ..Default::default()
        }
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.engine.validate()?;
        self.scoring.validate()
    }
}
