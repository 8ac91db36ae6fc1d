//! Board <-> strategy vector translation
//!
//! A strategy always sees itself as the first mover: when Second is to
//! move, marks are swapped before encoding. The live board is never touched.

use crate::board::{Board, Mark, Player, CELLS};
use crate::config::{EngineConfig, MarkEncoding};

/// Encodes boards for strategies and decodes their policy output
#[derive(Clone, Copy, Debug)]
pub struct Encoder {
    encoding: MarkEncoding,
    include_round: bool,
}

impl Encoder {
    pub fn new(encoding: MarkEncoding, include_round: bool) -> Self {
        Self {
            encoding,
            include_round,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.encoding, config.include_round)
    }

    pub fn input_width(&self) -> usize {
        if self.include_round {
            CELLS + 1
        } else {
            CELLS
        }
    }

    fn mark_value(&self, mark: Mark) -> f32 {
        match mark {
            Mark::Empty => self.encoding.empty,
            Mark::First => self.encoding.first,
            Mark::Second => self.encoding.second,
        }
    }

    /// Input vector for `perspective`, with `round` appended when enabled
    pub fn build_input(&self, board: &Board, perspective: Player, round: u32) -> Vec<f32> {
        let view = board.from_perspective(perspective);
        let mut input = Vec::with_capacity(self.input_width());
        input.extend(view.cells().iter().map(|&m| self.mark_value(m)));
        if self.include_round {
            input.push(round as f32);
        }
        input
    }

    /// Inverse of the cell part of [`Encoder::build_input`]
    ///
    /// Values that match no mark decode as `None`.
    pub fn decode_board(&self, input: &[f32], perspective: Player) -> Option<Board> {
        if input.len() < CELLS {
            return None;
        }
        let mut cells = [Mark::Empty; CELLS];
        for (cell, &value) in cells.iter_mut().zip(input) {
            *cell = if value == self.encoding.empty {
                Mark::Empty
            } else if value == self.encoding.first {
                Mark::First
            } else if value == self.encoding.second {
                Mark::Second
            } else {
                return None;
            };
        }
        Some(Board::from_cells(cells).from_perspective(perspective))
    }
}

/// Cell with the highest score; the lowest index wins ties
///
/// Occupied cells are NOT skipped. Picking one is a rule violation the
/// game session punishes.
pub fn decode_output(output: &[f32]) -> usize {
    let mut best = 0;
    for (i, &score) in output.iter().enumerate().skip(1) {
        if score > output[best] {
            best = i;
        }
    }
    best
}
