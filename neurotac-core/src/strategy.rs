//! Strategy capability consumed by the engine
//!
//! The engine never looks inside a strategy: it feeds a numeric board
//! encoding in and reads numbers back. Strategies are shared read-only
//! across concurrent games, hence the `Send + Sync` bound.

use crate::error::{EngineError, Result};

/// A decision-making agent that scores board encodings
pub trait Strategy: Send + Sync {
    /// Stable identifier used for logging and persistence
    fn name(&self) -> &str;

    /// Number of inputs the strategy expects (9, or 10 with the round number)
    fn input_width(&self) -> usize;

    /// Number of outputs it produces (1 for leaf scoring, 9 for a policy)
    fn output_width(&self) -> usize;

    /// Score an encoded position
    fn evaluate(&self, input: &[f32]) -> Vec<f32>;

    /// Flat parameter vector, opaque to the engine
    fn weights(&self) -> Vec<f32>;
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn input_width(&self) -> usize {
        (**self).input_width()
    }

    fn output_width(&self) -> usize {
        (**self).output_width()
    }

    fn evaluate(&self, input: &[f32]) -> Vec<f32> {
        (**self).evaluate(input)
    }

    fn weights(&self) -> Vec<f32> {
        (**self).weights()
    }
}

/// Run a strategy and check it returned the width it promised
pub fn evaluate_checked(strategy: &dyn Strategy, input: &[f32], expected: usize) -> Result<Vec<f32>> {
    let output = strategy.evaluate(input);
    if output.len() != expected {
        return Err(EngineError::OutputWidth {
            strategy: strategy.name().to_string(),
            expected,
            actual: output.len(),
        });
    }
    Ok(output)
}
