//! Crossover operators for network evolution
//!
//! Both parents must share a layer shape; genes are then exchanged
//! position by position.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::network::{Network, NetworkError};

/// Which operator builds a two-parent child
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverKind {
    #[default]
    Uniform,
    SinglePoint,
}

impl CrossoverKind {
    pub fn apply<R: Rng>(self, a: &Network, b: &Network, rng: &mut R) -> Result<Network, NetworkError> {
        match self {
            CrossoverKind::Uniform => crossover_networks(a, b, rng),
            CrossoverKind::SinglePoint => crossover_single_point(a, b, rng),
        }
    }
}

/// Uniform crossover: each gene comes from either parent with equal chance.
///
/// The child carries the first parent's name until the caller renames it.
pub fn crossover_networks<R: Rng>(a: &Network, b: &Network, rng: &mut R) -> Result<Network, NetworkError> {
    check_shapes(a, b)?;
    let mut child = a.clone();
    for (gene, &other) in child.genes_mut().iter_mut().zip(b.genes()) {
        if rng.gen_bool(0.5) {
            *gene = other;
        }
    }
    Ok(child)
}

/// Single-point crossover: genes before a random cut come from `a`, the rest from `b`.
pub fn crossover_single_point<R: Rng>(a: &Network, b: &Network, rng: &mut R) -> Result<Network, NetworkError> {
    check_shapes(a, b)?;
    let mut child = a.clone();
    let len = child.genes().len();
    let cut = rng.gen_range(0..=len);
    child.genes_mut()[cut..].copy_from_slice(&b.genes()[cut..]);
    Ok(child)
}

fn check_shapes(a: &Network, b: &Network) -> Result<(), NetworkError> {
    if a.same_shape(b) {
        Ok(())
    } else {
        Err(NetworkError::ShapeMismatch {
            a: a.name.clone(),
            b: b.name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn filled(name: &str, value: f32) -> Network {
        Network::from_weights(name, &[9, 4, 1], vec![value; 45]).unwrap()
    }

    #[test]
    fn test_uniform_mixes_both_parents() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let child = crossover_networks(&filled("a", 1.0), &filled("b", -1.0), &mut rng).unwrap();

        let from_a = child.genes().iter().filter(|&&g| g == 1.0).count();
        let from_b = child.genes().iter().filter(|&&g| g == -1.0).count();
        assert_eq!(from_a + from_b, 45);
        assert!(from_a > 0 && from_b > 0);
        assert_eq!(child.layers(), &[9, 4, 1]);
    }

    #[test]
    fn test_single_point_is_prefix_then_suffix() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..20 {
            let child = crossover_single_point(&filled("a", 1.0), &filled("b", -1.0), &mut rng).unwrap();
            let cut = child.genes().iter().position(|&g| g == -1.0).unwrap_or(45);
            assert!(child.genes()[..cut].iter().all(|&g| g == 1.0));
            assert!(child.genes()[cut..].iter().all(|&g| g == -1.0));
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let other = Network::from_weights("wide", &[10, 4, 1], vec![0.0; 49]).unwrap();
        let err = crossover_networks(&filled("a", 0.0), &other, &mut rng).unwrap_err();
        assert!(matches!(err, NetworkError::ShapeMismatch { .. }));
        assert!(crossover_single_point(&filled("a", 0.0), &other, &mut rng).is_err());
    }
}
