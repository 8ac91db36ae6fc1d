//! Feed-forward neural network used as an evolvable strategy
//!
//! Layers are fully connected with one bias per neuron. Hidden layers use
//! `tanh`, the output layer a sigmoid. Weights are stored flat, layer by
//! layer, each neuron's incoming weights followed by its bias.

use neurotac_core::Strategy;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Network construction errors
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("a network needs at least an input and an output layer, got {0} layers")]
    TooFewLayers(usize),

    #[error("layer {0} has no neurons")]
    EmptyLayer(usize),

    #[error("network {name} expects {expected} weights, got {actual}")]
    WeightCount {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("cannot cross {a} with {b}: layer shapes differ")]
    ShapeMismatch { a: String, b: String },
}

/// Number of weights (including biases) for the given layer sizes
pub fn weight_count(layers: &[usize]) -> usize {
    layers.windows(2).map(|w| (w[0] + 1) * w[1]).sum()
}

/// Layer sizes for `hidden_layers` layers of `neurons` between input and output
pub fn layer_sizes(input: usize, neurons: usize, hidden_layers: usize, output: usize) -> Vec<usize> {
    let mut layers = Vec::with_capacity(hidden_layers + 2);
    layers.push(input);
    layers.extend(std::iter::repeat(neurons).take(hidden_layers));
    layers.push(output);
    layers
}

fn check_layers(layers: &[usize]) -> Result<(), NetworkError> {
    if layers.len() < 2 {
        return Err(NetworkError::TooFewLayers(layers.len()));
    }
    if let Some(i) = layers.iter().position(|&n| n == 0) {
        return Err(NetworkError::EmptyLayer(i));
    }
    Ok(())
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Fully connected network
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    layers: Vec<usize>,
    weights: Vec<f32>,
}

impl Network {
    /// Network with weights drawn uniformly from [-1, 1]
    pub fn random<R: Rng>(name: impl Into<String>, layers: &[usize], rng: &mut R) -> Result<Self, NetworkError> {
        check_layers(layers)?;
        let weights = (0..weight_count(layers))
            .map(|_| rng.gen_range(-1.0..=1.0))
            .collect();
        Ok(Self {
            name: name.into(),
            layers: layers.to_vec(),
            weights,
        })
    }

    /// Network from a flat weight vector (e.g. loaded from a batch file)
    pub fn from_weights(
        name: impl Into<String>,
        layers: &[usize],
        weights: Vec<f32>,
    ) -> Result<Self, NetworkError> {
        check_layers(layers)?;
        let name = name.into();
        let expected = weight_count(layers);
        if weights.len() != expected {
            return Err(NetworkError::WeightCount {
                name,
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self {
            name,
            layers: layers.to_vec(),
            weights,
        })
    }

    pub fn layers(&self) -> &[usize] {
        &self.layers
    }

    pub fn genes(&self) -> &[f32] {
        &self.weights
    }

    pub fn genes_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }

    /// Whether two networks can exchange genes
    pub fn same_shape(&self, other: &Network) -> bool {
        self.layers == other.layers
    }

    /// Forward pass
    ///
    /// Missing inputs read as 0 and extra inputs are ignored.
    pub fn forward(&self, input: &[f32]) -> Vec<f32> {
        let mut activations: Vec<f32> = (0..self.layers[0])
            .map(|i| input.get(i).copied().unwrap_or(0.0))
            .collect();
        let mut offset = 0;
        let last = self.layers.len() - 1;

        for (l, window) in self.layers.windows(2).enumerate() {
            let (fan_in, fan_out) = (window[0], window[1]);
            let is_output = l + 1 == last;
            activations = (0..fan_out)
                .map(|_| {
                    let neuron = &self.weights[offset..offset + fan_in + 1];
                    offset += fan_in + 1;
                    let sum = neuron[fan_in]
                        + neuron[..fan_in]
                            .iter()
                            .zip(&activations)
                            .map(|(w, a)| w * a)
                            .sum::<f32>();
                    if is_output {
                        sigmoid(sum)
                    } else {
                        sum.tanh()
                    }
                })
                .collect();
        }
        activations
    }
}

impl Strategy for Network {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_width(&self) -> usize {
        self.layers[0]
    }

    fn output_width(&self) -> usize {
        self.layers[self.layers.len() - 1]
    }

    fn evaluate(&self, input: &[f32]) -> Vec<f32> {
        self.forward(input)
    }

    fn weights(&self) -> Vec<f32> {
        self.weights.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_weight_count() {
        assert_eq!(weight_count(&[9, 1]), 10);
        assert_eq!(weight_count(&[9, 9, 9, 1]), 90 + 90 + 10);
        assert_eq!(layer_sizes(9, 9, 2, 1), vec![9, 9, 9, 1]);
    }

    #[test]
    fn test_rejects_bad_layers() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(Network::random("n", &[9], &mut rng), Err(NetworkError::TooFewLayers(1)));
        assert_eq!(Network::random("n", &[9, 0, 1], &mut rng), Err(NetworkError::EmptyLayer(1)));
    }

    #[test]
    fn test_from_weights_checks_count() {
        let err = Network::from_weights("short", &[9, 1], vec![0.0; 9]).unwrap_err();
        assert_eq!(
            err,
            NetworkError::WeightCount {
                name: "short".into(),
                expected: 10,
                actual: 9
            }
        );
        assert!(err.to_string().contains("short"));
    }

    #[test]
    fn test_single_layer_forward() {
        // Output = sigmoid(bias + sum of inputs)
        let mut weights = vec![1.0; 9];
        weights.push(-2.0);
        let net = Network::from_weights("sum", &[9, 1], weights).unwrap();

        let zero = net.forward(&[0.0; 9]);
        assert!((zero[0] - sigmoid(-2.0)).abs() < 1e-6);

        let mut input = [0.0; 9];
        input[0] = 1.0;
        input[4] = 1.0;
        assert!((net.forward(&input)[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_outputs_in_sigmoid_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let net = Network::random("r", &[10, 9, 9, 9], &mut rng).unwrap();
        let out = net.evaluate(&[1.0, -1.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 1.0, 3.0]);
        assert_eq!(out.len(), 9);
        assert!(out.iter().all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn test_strategy_widths() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let net = Network::random("w", &[10, 4, 1], &mut rng).unwrap();
        assert_eq!(net.input_width(), 10);
        assert_eq!(net.output_width(), 1);
        assert_eq!(net.weights().len(), weight_count(&[10, 4, 1]));
    }
}
