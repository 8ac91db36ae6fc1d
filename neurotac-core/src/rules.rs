//! Legality and termination rules

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, CELLS};

/// Maximum plies in a game (every move fills one cell)
pub const MAX_PLIES: u32 = CELLS as u32;

/// The 8 winning lines, checked in this order: rows, columns, diagonals
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Terminal game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
    /// The named player targeted an occupied (or nonexistent) cell
    IllegalMove(Player),
}

impl Outcome {
    /// Player who won, if any. An illegal move does not crown the opponent.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win(p) => Some(*p),
            _ => None,
        }
    }

    /// Player who broke the rules, if any
    pub fn offender(&self) -> Option<Player> {
        match self {
            Outcome::IllegalMove(p) => Some(*p),
            _ => None,
        }
    }
}

/// Owner of the first completed line, in `WIN_LINES` order
///
/// Boards with two different completed lines cannot arise from legal play.
pub fn line_winner(board: &Board) -> Option<Player> {
    WIN_LINES.iter().find_map(|&[a, b, c]| {
        let cells = board.cells();
        let mark = cells[a];
        if mark == cells[b] && mark == cells[c] {
            mark.owner()
        } else {
            None
        }
    })
}

/// Win, draw, or `None` if the game continues
pub fn check_terminal(board: &Board) -> Option<Outcome> {
    if let Some(player) = line_winner(board) {
        return Some(Outcome::Win(player));
    }
    if board.is_full() {
        return Some(Outcome::Draw);
    }
    None
}

/// Uniformly random empty cell, `None` on a full board
pub fn random_legal_move<R: Rng>(board: &Board, rng: &mut R) -> Option<usize> {
    board.legal_moves().choose(rng).copied()
}
