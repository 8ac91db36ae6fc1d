//! Deterministic strategies for tests

use neurotac_core::Strategy;

/// Policy strategy that always proposes the lowest empty cell
pub struct ScanPolicy(pub String);

impl Strategy for ScanPolicy {
    fn name(&self) -> &str {
        &self.0
    }
    fn input_width(&self) -> usize {
        9
    }
    fn output_width(&self) -> usize {
        9
    }
    fn evaluate(&self, input: &[f32]) -> Vec<f32> {
        input
            .iter()
            .take(9)
            .enumerate()
            .map(|(i, &v)| if v == 0.0 { 10.0 - i as f32 } else { 0.0 })
            .collect()
    }
    fn weights(&self) -> Vec<f32> {
        Vec::new()
    }
}

/// Policy strategy that always proposes the same cell
pub struct Stubborn(pub usize);

impl Strategy for Stubborn {
    fn name(&self) -> &str {
        "stubborn"
    }
    fn input_width(&self) -> usize {
        9
    }
    fn output_width(&self) -> usize {
        9
    }
    fn evaluate(&self, _input: &[f32]) -> Vec<f32> {
        let mut out = vec![0.0; 9];
        out[self.0] = 1.0;
        out
    }
    fn weights(&self) -> Vec<f32> {
        Vec::new()
    }
}

/// Policy strategy proposing its listed cells in turn, one per own move
///
/// The turn is read from the number of marks on the board; the last cell
/// repeats once the list runs out.
pub struct Sequence(pub Vec<usize>);

impl Strategy for Sequence {
    fn name(&self) -> &str {
        "sequence"
    }
    fn input_width(&self) -> usize {
        9
    }
    fn output_width(&self) -> usize {
        9
    }
    fn evaluate(&self, input: &[f32]) -> Vec<f32> {
        let marks = input.iter().take(9).filter(|&&v| v != 0.0).count();
        let turn = (marks / 2).min(self.0.len() - 1);
        let mut out = vec![0.0; 9];
        out[self.0[turn]] = 1.0;
        out
    }
    fn weights(&self) -> Vec<f32> {
        Vec::new()
    }
}

/// Leaf scorer counting its own marks in the given cells
pub struct Likes(pub Vec<usize>);

impl Strategy for Likes {
    fn name(&self) -> &str {
        "likes"
    }
    fn input_width(&self) -> usize {
        9
    }
    fn output_width(&self) -> usize {
        1
    }
    fn evaluate(&self, input: &[f32]) -> Vec<f32> {
        let mine = self.0.iter().filter(|&&c| input[c] == 1.0).count();
        vec![mine as f32]
    }
    fn weights(&self) -> Vec<f32> {
        Vec::new()
    }
}
