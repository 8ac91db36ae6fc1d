//! Board state: nine cells in row-major order

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rules::{self, Outcome};

/// Number of cells on the board
pub const CELLS: usize = 9;

/// Side length of the board
pub const SIDE: usize = 3;

/// Seat at the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Mark this player leaves on the board
    pub fn mark(self) -> Mark {
        match self {
            Player::First => Mark::First,
            Player::Second => Mark::Second,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "first"),
            Player::Second => write!(f, "second"),
        }
    }
}

/// Cell contents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    First,
    Second,
}

impl Mark {
    /// Owner of the mark, `None` for an empty cell
    pub fn owner(self) -> Option<Player> {
        match self {
            Mark::Empty => None,
            Mark::First => Some(Player::First),
            Mark::Second => Some(Player::Second),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Mark::Empty
    }

    /// Swap First and Second, leaving Empty alone
    pub fn flipped(self) -> Self {
        match self {
            Mark::Empty => Mark::Empty,
            Mark::First => Mark::Second,
            Mark::Second => Mark::First,
        }
    }

    fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::First => 'X',
            Mark::Second => 'O',
        }
    }
}

/// 3x3 board (copy to branch)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Mark; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit cell contents
    pub fn from_cells(cells: [Mark; CELLS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELLS] {
        &self.cells
    }

    /// Contents of a cell; out-of-range indices read as `None`
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    /// True if `index` is on the board and empty
    pub fn is_open(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    /// Write a mark without any legality check
    ///
    /// Panics if `index` is off the board.
    pub fn place(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    /// Clear a cell (used to undo a search move)
    pub fn clear(&mut self, index: usize) {
        self.cells[index] = Mark::Empty;
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells = [Mark::Empty; CELLS];
    }

    /// Indices of empty cells, ascending
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, mark)| mark.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|m| !m.is_empty())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_empty()).count()
    }

    /// Terminal state of the board, `None` while play can continue
    pub fn check_terminal(&self) -> Option<Outcome> {
        rules::check_terminal(self)
    }

    /// Copy of the board seen from the other seat
    pub fn flipped(&self) -> Self {
        let mut cells = self.cells;
        for cell in cells.iter_mut() {
            *cell = cell.flipped();
        }
        Self { cells }
    }

    /// Board as the given player should perceive it (always as First)
    pub fn from_perspective(&self, player: Player) -> Self {
        match player {
            Player::First => *self,
            Player::Second => self.flipped(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(SIDE) {
            let line: String = row.iter().map(|m| m.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
