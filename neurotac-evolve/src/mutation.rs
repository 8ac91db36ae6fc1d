//! Mutation operators for network evolution
//!
//! Gene-wise perturbation: each weight is touched with probability `rate`
//! and moved by a uniform amount in `[-strength, strength]`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::network::Network;

/// Configuration for mutation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Fraction of genes mutated per offspring
    pub rate: f64,
    /// Maximum absolute change applied to a mutated gene
    pub strength: f32,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate: 0.05,
            strength: 1.0,
        }
    }
}

impl MutationConfig {
    pub fn new(rate: f64, strength: f32) -> Self {
        Self { rate, strength }
    }
}

/// Mutate genes in place, returning how many were changed
pub fn mutate_genes<R: Rng>(genes: &mut [f32], config: &MutationConfig, rng: &mut R) -> usize {
    let rate = config.rate.clamp(0.0, 1.0);
    let strength = config.strength.abs();
    let mut changed = 0;

    for gene in genes.iter_mut() {
        if rng.gen_bool(rate) {
            if strength > 0.0 {
                *gene += rng.gen_range(-strength..=strength);
            }
            changed += 1;
        }
    }
    changed
}

/// Mutate a copy of a network
pub fn mutate_network<R: Rng>(network: &Network, config: &MutationConfig, rng: &mut R) -> Network {
    let mut child = network.clone();
    let changed = mutate_genes(child.genes_mut(), config, rng);
    tracing::trace!(parent = %network.name, changed, "mutated");
    child
}
