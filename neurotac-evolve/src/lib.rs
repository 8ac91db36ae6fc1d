//! NEUROTAC Evolution - Neuro-evolution of tic-tac-toe strategies
//!
//! This crate provides:
//! - Feed-forward networks that act as engine strategies
//! - Selection (tournament, elitism)
//! - Mutation and crossover operators
//! - Readable names and batch persistence
//!
//! Fitness is supplied by the caller over the whole population, so the same
//! loop serves round-robin tournaments and per-strategy evaluation alike.

pub mod batch;
pub mod crossover;
pub mod mutation;
pub mod naming;
pub mod network;
pub mod selection;

pub use batch::{load_batch, load_batches, save_batch, BatchEntry, BatchError};
pub use crossover::{crossover_networks, crossover_single_point, CrossoverKind};
pub use mutation::{mutate_network, MutationConfig};
pub use naming::network_name;
pub use network::{layer_sizes, weight_count, Network, NetworkError};
pub use selection::{select_elite, tournament_select, tournament_select_many};

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Evolution configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation: MutationConfig,
    /// Probability an offspring comes from two parents rather than one
    pub crossover_rate: f64,
    pub crossover: CrossoverKind,
    /// Best individuals copied unchanged into the next generation
    pub elitism: usize,
    pub tournament_size: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation: MutationConfig::default(),
            crossover_rate: 0.7,
            crossover: CrossoverKind::Uniform,
            elitism: 2,
            tournament_size: 3,
        }
    }
}

/// Summary of one generation, handed to the progress callback
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub best_fitness: f32,
    pub mean_fitness: f32,
    pub best_name: String,
}

/// Final population and history
#[derive(Clone, Debug)]
pub struct EvolutionResult {
    /// Final population, best first
    pub population: Vec<Network>,
    /// Fitness of `population`, same order
    pub fitness: Vec<f32>,
    /// One entry per generation bred
    pub history: Vec<GenerationStats>,
}

impl EvolutionResult {
    pub fn best(&self) -> Option<&Network> {
        self.population.first()
    }

    /// The best `n` networks
    pub fn top_n(&self, n: usize) -> &[Network] {
        &self.population[..n.min(self.population.len())]
    }
}

/// Random population of `size` networks, named for generation 0
pub fn create_population<R: Rng>(
    size: usize,
    layers: &[usize],
    rng: &mut R,
) -> Result<Vec<Network>, NetworkError> {
    (0..size)
        .map(|_| {
            let mut net = Network::random("", layers, rng)?;
            net.name = network_name(&net, 0);
            Ok(net)
        })
        .collect()
}

/// Evolve a population, reporting each generation to `callback`.
///
/// `fitness_fn` scores the whole population at once and must return one
/// value per member (higher is better). After the last generation the
/// population is scored once more and returned sorted.
pub fn evolve_with_callback<F, C, E, R>(
    population: Vec<Network>,
    config: &EvolutionConfig,
    mut fitness_fn: F,
    mut callback: C,
    rng: &mut R,
) -> Result<EvolutionResult, E>
where
    F: FnMut(&[Network]) -> Result<Vec<f32>, E>,
    C: FnMut(&GenerationStats),
    R: Rng,
{
    let mut population = population;
    let mut history = Vec::with_capacity(config.generations);

    if population.is_empty() {
        return Ok(EvolutionResult {
            population,
            fitness: Vec::new(),
            history,
        });
    }

    for generation in 0..config.generations {
        let fitness = fitness_fn(&population)?;
        let stats = generation_stats(generation, &population, &fitness);
        tracing::info!(
            "generation {}: best {} ({:.3}), mean {:.3}",
            generation,
            stats.best_name,
            stats.best_fitness,
            stats.mean_fitness
        );
        callback(&stats);
        history.push(stats);

        population = breed(&population, &fitness, config, generation + 1, rng);
    }

    let fitness = fitness_fn(&population)?;
    let order = select_elite(&fitness, population.len());
    let mut slots: Vec<Option<Network>> = population.into_iter().map(Some).collect();
    let population: Vec<Network> = order.iter().filter_map(|&i| slots[i].take()).collect();
    let fitness = order.iter().map(|&i| fitness[i]).collect();

    Ok(EvolutionResult {
        population,
        fitness,
        history,
    })
}

/// Evolve without a progress callback
pub fn evolve<F, E, R>(
    population: Vec<Network>,
    config: &EvolutionConfig,
    fitness_fn: F,
    rng: &mut R,
) -> Result<EvolutionResult, E>
where
    F: FnMut(&[Network]) -> Result<Vec<f32>, E>,
    R: Rng,
{
    evolve_with_callback(population, config, fitness_fn, |_| {}, rng)
}

fn generation_stats(generation: usize, population: &[Network], fitness: &[f32]) -> GenerationStats {
    assert_eq!(population.len(), fitness.len(), "fitness must score every member");
    let best = select_elite(fitness, 1)[0];
    GenerationStats {
        generation,
        best_fitness: fitness[best],
        mean_fitness: fitness.iter().sum::<f32>() / fitness.len() as f32,
        best_name: population[best].name.clone(),
    }
}

/// Next generation: elites first, then offspring from tournament parents
fn breed<R: Rng>(
    population: &[Network],
    fitness: &[f32],
    config: &EvolutionConfig,
    generation: usize,
    rng: &mut R,
) -> Vec<Network> {
    let size = population.len();
    let mut next: Vec<Network> = select_elite(fitness, config.elitism.min(size))
        .into_iter()
        .map(|i| population[i].clone())
        .collect();

    let tournament_size = config.tournament_size.max(1);
    let crossover_rate = config.crossover_rate.clamp(0.0, 1.0);

    while next.len() < size {
        let child = if rng.gen_bool(crossover_rate) {
            let parents = tournament_select_many(population, fitness, 2, tournament_size, rng);
            match config.crossover.apply(parents[0], parents[1], rng) {
                Ok(child) => child,
                Err(err) => {
                    tracing::warn!("{}", err);
                    parents[0].clone()
                }
            }
        } else {
            tournament_select(population, fitness, tournament_size, rng).clone()
        };

        let mut child = mutate_network(&child, &config.mutation, rng);
        child.name = network_name(&child, generation);
        next.push(child);
    }
    next
}
