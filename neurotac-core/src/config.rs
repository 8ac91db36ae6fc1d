//! Engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::CELLS;
use crate::error::{EngineError, Result};
use crate::rules::MAX_PLIES;
use crate::strategy::Strategy;

/// Numeric values used for marks when a board is handed to a strategy
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarkEncoding {
    pub empty: f32,
    pub first: f32,
    pub second: f32,
}

impl MarkEncoding {
    /// First = 1, Second = 2
    pub const ORDINAL: MarkEncoding = MarkEncoding {
        empty: 0.0,
        first: 1.0,
        second: 2.0,
    };

    /// First = 1, Second = -1
    pub const SIGNED: MarkEncoding = MarkEncoding {
        empty: 0.0,
        first: 1.0,
        second: -1.0,
    };
}

impl Default for MarkEncoding {
    fn default() -> Self {
        MarkEncoding::ORDINAL
    }
}

/// How a strategy's output turns into a move
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvalMode {
    /// Strategy scores whole positions; minimax picks the move
    #[default]
    Minimax,
    /// Strategy scores all nine cells of the current position
    Policy,
}

impl EvalMode {
    /// Output width a strategy must have in this mode
    pub fn output_width(self) -> usize {
        match self {
            EvalMode::Minimax => 1,
            EvalMode::Policy => CELLS,
        }
    }
}

/// Engine configuration shared by every game of a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Mark values fed to strategies
    pub encoding: MarkEncoding,
    /// Append the ply counter as a 10th input
    pub include_round: bool,
    /// Minimax leaf scoring or direct policy
    pub mode: EvalMode,
    /// Minimax look-ahead in plies (ignored in policy mode)
    pub depth: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            encoding: MarkEncoding::ORDINAL,
            include_round: false,
            mode: EvalMode::Minimax,
            depth: 1,
        }
    }
}

impl EngineConfig {
    /// Minimax config at the given depth
    pub fn minimax(depth: u32) -> Self {
        Self {
            mode: EvalMode::Minimax,
            depth,
            ..Default::default()
        }
    }

    /// Direct-policy config
    pub fn policy() -> Self {
        Self {
            mode: EvalMode::Policy,
            depth: 0,
            ..Default::default()
        }
    }

    pub fn with_encoding(mut self, encoding: MarkEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_round_input(mut self, include_round: bool) -> Self {
        self.include_round = include_round;
        self
    }

    /// Width of the vector handed to strategies
    pub fn input_width(&self) -> usize {
        if self.include_round {
            CELLS + 1
        } else {
            CELLS
        }
    }

    pub fn output_width(&self) -> usize {
        self.mode.output_width()
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        let too_shallow = self.mode == EvalMode::Minimax && self.depth == 0;
        if too_shallow || self.depth > MAX_PLIES {
            return Err(EngineError::InvalidDepth(self.depth));
        }
        Ok(())
    }

    /// Check a strategy fits this engine before any game is played
    pub fn check_strategy(&self, strategy: &dyn Strategy) -> Result<()> {
        if strategy.input_width() != self.input_width() {
            return Err(EngineError::InputWidth {
                strategy: strategy.name().to_string(),
                expected: self.input_width(),
                actual: strategy.input_width(),
            });
        }
        if strategy.output_width() != self.output_width() {
            return Err(EngineError::OutputWidth {
                strategy: strategy.name().to_string(),
                expected: self.output_width(),
                actual: strategy.output_width(),
            });
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.mode, EvalMode::Minimax);
        assert_eq!(config.depth, 1);
        assert_eq!(config.input_width(), 9);
        assert_eq!(config.output_width(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_input_widens() {
        let config = EngineConfig::policy().with_round_input(true);
        assert_eq!(config.input_width(), 10);
        assert_eq!(config.output_width(), 9);
    }

    #[test]
    fn test_depth_beyond_game_length_rejected() {
        let config = EngineConfig::minimax(10);
        assert!(matches!(config.validate(), Err(EngineError::InvalidDepth(10))));
        assert!(EngineConfig::minimax(9).validate().is_ok());
        assert!(matches!(EngineConfig::minimax(0).validate(), Err(EngineError::InvalidDepth(0))));
        assert!(EngineConfig::policy().validate().is_ok());
    }

    #[test]
    fn test_depth_zero_minimax_error_points_to_policy_mode() {
        let err = EngineConfig::minimax(0).validate().unwrap_err();
        assert!(err.to_string().contains("policy mode"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"depth": 3, "mode": "Policy"}"#).unwrap();
        assert_eq!(config.depth, 3);
        assert_eq!(config.mode, EvalMode::Policy);
        assert_eq!(config.encoding, MarkEncoding::ORDINAL);
    }
}
