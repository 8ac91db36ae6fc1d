//! Move selection: minimax with strategy-scored leaves, or a direct policy
//!
//! Minimax roles are relative to the seat being searched for: that seat
//! maximizes the leaf score, its opponent minimizes it. Leaves are always
//! encoded from the searching seat's perspective, so the score is that
//! seat's own judgement of the position.
//!
//! Tie-break: strict comparison for both roles. Moves are enumerated in
//! ascending cell order, so the lowest equal-scoring cell is kept.

use crate::board::{Board, Player};
use crate::config::{EngineConfig, EvalMode};
use crate::encoding::{decode_output, Encoder};
use crate::error::{EngineError, Result};
use crate::strategy::{evaluate_checked, Strategy};

/// Counters collected during one move decision
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of times the strategy was asked to score a position
    pub leaves: usize,
}

/// Result of a move decision
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    /// Proposed cell (not necessarily legal in policy mode)
    pub cell: usize,
    /// Score backing the choice
    pub score: f32,
    pub stats: SearchStats,
}

/// Minimax searcher for one seat
pub struct Minimax<'a> {
    strategy: &'a dyn Strategy,
    encoder: Encoder,
    perspective: Player,
    round: u32,
    stats: SearchStats,
}

impl<'a> Minimax<'a> {
    pub fn new(strategy: &'a dyn Strategy, encoder: Encoder, perspective: Player, round: u32) -> Self {
        Self {
            strategy,
            encoder,
            perspective,
            round,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Best achievable leaf score and the move reaching it
    ///
    /// The board is mutated and restored move by move; it is back in its
    /// starting state when this returns, including on error. The move is
    /// `None` when the position itself is a leaf.
    pub fn search(&mut self, board: &mut Board, depth: u32, maximizing: bool) -> Result<(f32, Option<usize>)> {
        self.search_from(board, depth, maximizing, 0)
    }

    fn search_from(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
        ply: u32,
    ) -> Result<(f32, Option<usize>)> {
        if depth == 0 || board.is_full() {
            return Ok((self.score_leaf(board, ply)?, None));
        }

        let mover = if maximizing {
            self.perspective
        } else {
            self.perspective.opponent()
        };

        let mut best_score = if maximizing { f32::NEG_INFINITY } else { f32::INFINITY };
        let mut best_move = None;

        for cell in board.legal_moves() {
            board.place(cell, mover.mark());
            let result = self.search_from(board, depth - 1, !maximizing, ply + 1);
            board.clear(cell);
            let (score, _) = result?;

            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better || best_move.is_none() {
                best_score = score;
                best_move = Some(cell);
            }
        }

        Ok((best_score, best_move))
    }

    fn score_leaf(&mut self, board: &Board, ply: u32) -> Result<f32> {
        self.stats.leaves += 1;
        let input = self.encoder.build_input(board, self.perspective, self.round + ply);
        let output = evaluate_checked(self.strategy, &input, 1)?;
        Ok(output[0])
    }
}

/// Ask `strategy` for `player`'s next move on `board`
///
/// `round` is the number of plies already played.
pub fn choose_move(
    strategy: &dyn Strategy,
    board: &Board,
    player: Player,
    round: u32,
    config: &EngineConfig,
) -> Result<Decision> {
    config.check_strategy(strategy)?;
    let encoder = Encoder::from_config(config);
    match config.mode {
        EvalMode::Minimax => {
            let mut scratch = *board;
            let mut searcher = Minimax::new(strategy, encoder, player, round);
            let (score, cell) = searcher.search(&mut scratch, config.depth, true)?;
            let cell = cell.ok_or(EngineError::InvalidDepth(config.depth))?;
            Ok(Decision {
                cell,
                score,
                stats: searcher.stats(),
            })
        }
        EvalMode::Policy => {
            let input = encoder.build_input(board, player, round);
            let output = evaluate_checked(strategy, &input, config.output_width())?;
            let cell = decode_output(&output);
            Ok(Decision {
                cell,
                score: output[cell],
                stats: SearchStats { leaves: 1 },
            })
        }
    }
}
