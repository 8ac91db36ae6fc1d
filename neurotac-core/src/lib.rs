//! NEUROTAC Core - Game engine and move selection
//!
//! This crate provides the core game logic for NEUROTAC:
//! - 3x3 board with tagged marks
//! - Win/draw detection and legal moves
//! - Strategy adapter (perspective-normalized encoding)
//! - Minimax and direct-policy move selection
//! - Game session state machine with illegal-move detection

pub mod board;
pub mod rules;
pub mod strategy;
pub mod encoding;
pub mod search;
pub mod game;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Mark, Player, CELLS};
pub use rules::{Outcome, WIN_LINES, MAX_PLIES, check_terminal, random_legal_move};
pub use strategy::Strategy;
pub use encoding::{Encoder, decode_output};
pub use search::{choose_move, Decision, Minimax, SearchStats};
pub use game::{GameSession, Phase};
pub use config::{EngineConfig, EvalMode, MarkEncoding};
pub use error::EngineError;
