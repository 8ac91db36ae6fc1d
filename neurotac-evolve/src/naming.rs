//! Network naming - human-readable identifiers for tracking evolution
//!
//! Names look like "iron-wolf-g12": two words hashed from the weights plus
//! the generation the network was born in. The same weights always hash to
//! the same words.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::network::Network;

// 64 adjectives + 64 nouns = 4096 word pairs
const ADJECTIVES: [&str; 64] = [
    "red", "blue", "gold", "dark", "pale", "wild", "calm", "bold",
    "swift", "slow", "warm", "cold", "soft", "hard", "deep", "high",
    "iron", "silk", "jade", "ruby", "onyx", "opal", "amber", "coral",
    "quick", "still", "bright", "dim", "fresh", "old", "new", "lost",
    "stone", "glass", "steel", "brass", "copper", "silver", "bronze", "chrome",
    "sharp", "blunt", "keen", "dull", "pure", "mixed", "raw", "fine",
    "north", "south", "east", "west", "inner", "outer", "upper", "lower",
    "first", "last", "prime", "dual", "twin", "lone", "true", "void",
];

const NOUNS: [&str; 64] = [
    "wolf", "bear", "hawk", "lion", "fox", "owl", "elk", "ram",
    "oak", "pine", "elm", "ash", "fern", "moss", "vine", "root",
    "storm", "flame", "frost", "tide", "wind", "dust", "mist", "haze",
    "crown", "blade", "shield", "helm", "lance", "bow", "staff", "ring",
    "tower", "gate", "wall", "bridge", "path", "road", "trail", "pass",
    "dawn", "dusk", "noon", "night", "moon", "star", "sun", "sky",
    "peak", "vale", "cave", "lake", "river", "shore", "cliff", "ridge",
    "forge", "anvil", "hammer", "arrow", "spear", "axe", "sword", "torch",
];

/// Hash of a network's shape and weight bits
pub fn weight_signature(network: &Network) -> u64 {
    let mut hasher = FxHasher::default();
    network.layers().hash(&mut hasher);
    for gene in network.genes() {
        gene.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

/// Two words picked from a 64-bit signature
pub fn signature_to_words(sig: u64) -> String {
    // FxHash mixes poorly into the low bits, so draw from the top
    let adj_idx = ((sig >> 58) & 0x3F) as usize;
    let noun_idx = ((sig >> 52) & 0x3F) as usize;
    format!("{}-{}", ADJECTIVES[adj_idx], NOUNS[noun_idx])
}

/// Name a network born in `generation`
pub fn network_name(network: &Network, generation: usize) -> String {
    format!("{}-g{}", signature_to_words(weight_signature(network)), generation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(weights: Vec<f32>) -> Network {
        Network::from_weights("n", &[2, 1], weights).unwrap()
    }

    #[test]
    fn test_name_deterministic() {
        let a = net(vec![0.1, 0.2, 0.3]);
        assert_eq!(network_name(&a, 3), network_name(&a.clone(), 3));
    }

    #[test]
    fn test_name_ignores_current_name() {
        let a = net(vec![0.1, 0.2, 0.3]);
        let mut b = a.clone();
        b.name = "renamed".into();
        assert_eq!(weight_signature(&a), weight_signature(&b));
    }

    #[test]
    fn test_name_format() {
        let name = network_name(&net(vec![0.5, -0.5, 1.0]), 12);
        let parts: Vec<&str> = name.split('-').collect();
        assert_eq!(parts.len(), 3, "unexpected name {}", name);
        assert_eq!(parts[2], "g12");
    }

    #[test]
    fn test_signature_sees_weights() {
        assert_ne!(
            weight_signature(&net(vec![0.1, 0.2, 0.3])),
            weight_signature(&net(vec![0.1, 0.2, 0.4]))
        );
    }
}
