//! Engine errors
//!
//! Only broken contracts end up here. Illegal moves are game outcomes,
//! see [`crate::rules::Outcome::IllegalMove`].

/// Fatal configuration and strategy-contract errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("strategy '{strategy}' expects {actual} inputs, engine produces {expected}")]
    InputWidth {
        strategy: String,
        expected: usize,
        actual: usize,
    },

    #[error("strategy '{strategy}' returned {actual} outputs, expected {expected}")]
    OutputWidth {
        strategy: String,
        expected: usize,
        actual: usize,
    },

    #[error("minimax depth {0} invalid: a search needs 1..=9 plies to pick a move (depth 0 is policy mode only)")]
    InvalidDepth(u32),

    #[error("invalid scoring: {0}")]
    InvalidScoring(String),

    #[error("config i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("config format: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
