//! Selection operators for genetic algorithms
//!
//! Tournament selection for breeding and elitism for carrying the best
//! individuals into the next generation unchanged.

use rand::Rng;

/// Tournament selection: pick `tournament_size` individuals at random
/// (with replacement) and return the fittest.
///
/// # Arguments
/// * `population` - Individuals to draw from
/// * `fitness` - Score of each individual, same order (higher = better)
/// * `tournament_size` - Entrants per tournament, capped at the population size
/// * `rng` - Random number generator
///
/// # Panics
/// Panics if population is empty, tournament_size is 0, or the fitness
/// slice does not match the population.
pub fn tournament_select<'a, T, R: Rng>(
    population: &'a [T],
    fitness: &[f32],
    tournament_size: usize,
    rng: &mut R,
) -> &'a T {
    assert!(!population.is_empty(), "Population cannot be empty");
    assert!(tournament_size > 0, "Tournament size must be > 0");
    assert_eq!(population.len(), fitness.len(), "Population and fitness must have same length");

    let tournament_size = tournament_size.min(population.len());

    let mut best_idx = rng.gen_range(0..population.len());
    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if fitness[idx] > fitness[best_idx] {
            best_idx = idx;
        }
    }

    &population[best_idx]
}

/// Run `count` independent tournaments, e.g. two for a pair of parents
///
/// # Arguments
/// * `population` - Individuals to draw from
/// * `fitness` - Score of each individual, same order
/// * `count` - Number of winners to return
/// * `tournament_size` - Entrants per tournament
/// * `rng` - Random number generator
pub fn tournament_select_many<'a, T, R: Rng>(
    population: &'a [T],
    fitness: &[f32],
    count: usize,
    tournament_size: usize,
    rng: &mut R,
) -> Vec<&'a T> {
    (0..count)
        .map(|_| tournament_select(population, fitness, tournament_size, rng))
        .collect()
}

/// Indices of the top `n` individuals, best first.
///
/// Ties keep population order.
pub fn select_elite(fitness: &[f32], n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitness.len()).collect();
    indices.sort_by(|&a, &b| {
        fitness[b].partial_cmp(&fitness[a]).unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(n);
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_tournament_select_favors_high_fitness() {
        let population: Vec<u32> = (0..10).collect();
        let fitness: Vec<f32> = (0..10).map(|i| i as f32).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let high = (0..100)
            .filter(|_| *tournament_select(&population, &fitness, 3, &mut rng) >= 7)
            .count();
        assert!(high > 50, "Tournament selection should favor high fitness, got {}", high);
    }

    #[test]
    fn test_select_elite() {
        let fitness = vec![0.5, 0.9, 0.3, 0.7, 0.1];
        assert_eq!(select_elite(&fitness, 3), vec![1, 3, 0]);
    }

    #[test]
    fn test_select_elite_ties_keep_order() {
        let fitness = vec![1.0, 2.0, 1.0, 2.0];
        assert_eq!(select_elite(&fitness, 4), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_select_elite_handles_small_pop() {
        assert_eq!(select_elite(&[0.5, 0.9], 5).len(), 2);
    }

    #[test]
    fn test_tournament_select_many() {
        let population = vec!["a", "b", "c", "d", "e"];
        let fitness = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let selected = tournament_select_many(&population, &fitness, 10, 2, &mut rng);
        assert_eq!(selected.len(), 10);
    }

    #[test]
    #[should_panic(expected = "Population cannot be empty")]
    fn test_empty_population_panics() {
        let population: Vec<u32> = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        tournament_select(&population, &[], 2, &mut rng);
    }
}
