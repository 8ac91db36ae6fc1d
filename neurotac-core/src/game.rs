//! Game session: one board driven from empty to a terminal outcome

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player};
use crate::rules::Outcome;

/// Where the session stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingFirst,
    AwaitingSecond,
    Terminal(Outcome),
}

/// Reusable game state (reset between games instead of reallocating)
#[derive(Clone, Debug, Default)]
pub struct GameSession {
    board: Board,
    outcome: Option<Outcome>,
    plies: u32,
}

impl GameSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Plies played so far (also the round number fed to strategies)
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Player to move; First on even plies
    pub fn to_move(&self) -> Player {
        if self.plies % 2 == 0 {
            Player::First
        } else {
            Player::Second
        }
    }

    pub fn phase(&self) -> Phase {
        match self.outcome {
            Some(outcome) => Phase::Terminal(outcome),
            None => match self.to_move() {
                Player::First => Phase::AwaitingFirst,
                Player::Second => Phase::AwaitingSecond,
            },
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_over() {
            return Vec::new();
        }
        self.board.legal_moves()
    }

    /// Apply the mover's proposed cell and return the outcome if the game ended
    ///
    /// Targeting an occupied or nonexistent cell ends the game with
    /// `IllegalMove(mover)` and leaves the board unchanged. Calling this
    /// after the game is over is a no-op returning the existing outcome.
    pub fn play(&mut self, cell: usize) -> Option<Outcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }
        let mover = self.to_move();

        if !self.board.is_open(cell) {
            tracing::debug!(%mover, cell, ply = self.plies, "illegal move");
            self.outcome = Some(Outcome::IllegalMove(mover));
            return self.outcome;
        }

        self.board.place(cell, mover.mark());
        self.plies += 1;
        self.outcome = self.board.check_terminal();
        self.outcome
    }

    /// Back to an empty board, no outcome, zero plies
    pub fn reset(&mut self) {
        self.board.reset();
        self.outcome = None;
        self.plies = 0;
    }
}
