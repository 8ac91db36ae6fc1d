//! Evolution command - breed tic-tac-toe strategies by neuro-evolution
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_population(), run_evolution(), save_results()
//! - Level 3: create_fitness_fn(), import_networks(), etc.
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rand_chacha::ChaCha8Rng;

use neurotac_core::EngineError;
use neurotac_evolve::{
    create_population, evolve_with_callback, load_batches, save_batch, BatchEntry, EvolutionConfig,
    EvolutionResult, MutationConfig, Network,
};
use neurotac_tournament::{evaluate_fitness, run_tournament, EvalConfig, TournamentConfig};

use crate::args::{CrossoverArg, EngineArgs, NetworkArgs, ScoringArgs};
use crate::create_rng;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// How a generation is scored
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FitnessMode {
    /// Every strategy plays every other in both seats
    RoundRobin,
    /// Each strategy plays the random baseline from both seats
    Teach,
}

#[derive(Args)]
pub struct EvolveArgs {
    /// Batch files to import into the pool (repeatable)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Where to save the best strategies
    #[arg(short = 's', long, default_value = "bestAi")]
    pub save_file: PathBuf,

    /// How many strategies to save (capped by pool size)
    #[arg(short = 'a', long, default_value = "10")]
    pub save_size: usize,

    /// Generations to train
    #[arg(short = 'g', long, default_value = "500")]
    pub generations: usize,

    /// Fraction of genes mutated per offspring
    #[arg(short = 'm', long, default_value = "0.05")]
    pub mutation: f64,

    /// Strength of an applied mutation
    #[arg(short = 't', long, default_value = "1")]
    pub mutation_strength: f32,

    /// Networks in the pool, not counting imported ones
    #[arg(short = 'p', long, default_value = "100")]
    pub pool_size: usize,

    /// Crossover rate (0.0-1.0)
    #[arg(long, default_value = "0.7")]
    pub crossover_rate: f64,

    /// Crossover operator
    #[arg(long, value_enum, default_value = "uniform")]
    pub crossover: CrossoverArg,

    /// Number of elite individuals to preserve
    #[arg(long, default_value = "2")]
    pub elitism: usize,

    /// Tournament selection size
    #[arg(long, default_value = "3")]
    pub tournament_size: usize,

    /// How fitness is measured
    #[arg(long, value_enum, default_value = "round-robin")]
    pub fitness: FitnessMode,

    /// Baseline sessions per strategy in teach mode
    #[arg(long, default_value = "5")]
    pub sessions: usize,

    /// Evaluate on one thread
    #[arg(long)]
    pub sequential: bool,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(flatten)]
    pub scoring: ScoringArgs,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything a fitness evaluation needs, fixed for the whole run
struct FitnessSetup {
    mode: FitnessMode,
    tournament: TournamentConfig,
    eval: EvalConfig,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run evolution command
///
/// 1. Build configuration
/// 2. Import saved strategies and fill the pool
/// 3. Run evolution loop
/// 4. Save the best strategies
pub fn run(args: EvolveArgs, seed: Option<u64>) -> Result<()> {
    let setup = build_fitness_setup(&args, seed)?;
    let layers = args.network.layers(&setup.tournament.engine);
    let mut rng = create_rng(seed);

    let population = build_population(&args, &layers, &mut rng)?;
    let config = build_evolution_config(&args, population.len());

    tracing::info!(
        "Starting evolution: pool={}, gen={}, layers={:?}, fitness={:?}",
        config.population_size,
        config.generations,
        layers,
        args.fitness
    );

    let result = run_evolution(population, &config, setup, &args, &mut rng)?;

    save_results(&result, &args)?;
    report_results(&result, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_fitness_setup(args: &EvolveArgs, seed: Option<u64>) -> Result<FitnessSetup> {
    let engine = args.engine.to_config()?;
    let scoring = args.scoring.to_config()?;
    let base_seed = seed.unwrap_or(42);

    let mut tournament = TournamentConfig::new(engine.clone()).with_scoring(scoring);
    tournament.seed = base_seed;
    tournament.parallel = !args.sequential;

    let mut eval = EvalConfig::new(args.sessions)
        .with_engine(engine)
        .with_scoring(scoring);
    eval.seed = base_seed;
    eval.parallel = !args.sequential;
    eval.validate()?;

    Ok(FitnessSetup {
        mode: args.fitness,
        tournament,
        eval,
    })
}

fn build_evolution_config(args: &EvolveArgs, population_size: usize) -> EvolutionConfig {
    EvolutionConfig {
        population_size,
        generations: args.generations,
        mutation: MutationConfig::new(args.mutation, args.mutation_strength),
        crossover_rate: args.crossover_rate,
        crossover: args.crossover.into(),
        elitism: args.elitism,
        tournament_size: args.tournament_size,
    }
}

/// Imported strategies first, then random networks up to the grown pool size
fn build_population(args: &EvolveArgs, layers: &[usize], rng: &mut ChaCha8Rng) -> Result<Vec<Network>> {
    let mut population = import_networks(&args.files, layers);
    let target = args.pool_size + population.len();

    let fresh = create_population(target - population.len(), layers, rng)
        .context("Invalid network layout")?;
    population.extend(fresh);

    tracing::info!("Initial population: {} networks", population.len());
    Ok(population)
}

/// Run the evolution loop with a progress bar
fn run_evolution(
    population: Vec<Network>,
    config: &EvolutionConfig,
    setup: FitnessSetup,
    args: &EvolveArgs,
    rng: &mut ChaCha8Rng,
) -> Result<EvolutionResult> {
    let progress = create_progress_bar(config.generations as u64, args.json)?;
    let fitness_fn = create_fitness_fn(setup);

    let callback = |stats: &neurotac_evolve::GenerationStats| {
        progress.set_message(format!("best {} ({:.3})", stats.best_name, stats.best_fitness));
        progress.inc(1);
    };

    let result = evolve_with_callback(population, config, fitness_fn, callback, rng)
        .context("Evolution stopped")?;
    progress.finish_and_clear();
    Ok(result)
}

/// Save the top strategies to the save file
fn save_results(result: &EvolutionResult, args: &EvolveArgs) -> Result<()> {
    let pool = result.population.len();
    let save_size = if args.save_size > pool {
        tracing::warn!("save size {} exceeds pool size {}, saving {}", args.save_size, pool, pool);
        pool
    } else {
        args.save_size
    };

    let entries: Vec<BatchEntry> = result
        .top_n(save_size)
        .iter()
        .map(|n| BatchEntry::from_strategy(n))
        .collect();
    save_batch(&args.save_file, &entries)
        .with_context(|| format!("Failed to save {}", args.save_file.display()))?;
    Ok(())
}

fn report_results(result: &EvolutionResult, args: &EvolveArgs) -> Result<()> {
    if args.json {
        print_json_results(result, args)
    } else {
        print_summary(result, args);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn import_networks(files: &[PathBuf], layers: &[usize]) -> Vec<Network> {
    let mut networks = Vec::new();
    for (i, entry) in load_batches(files).into_iter().enumerate() {
        let name = entry.name.clone();
        match entry.into_network(layers) {
            Ok(network) => {
                tracing::info!("imported strategy {} {}", i, name);
                networks.push(network);
            }
            Err(e) => tracing::warn!("Skipping imported strategy: {}", e),
        }
    }
    networks
}

/// Fitness over the whole population
///
/// Each generation gets its own seed range so the baseline and tie-breaking
/// games vary between generations.
fn create_fitness_fn(setup: FitnessSetup) -> impl FnMut(&[Network]) -> Result<Vec<f32>, EngineError> {
    let mut generation: u64 = 0;
    move |population: &[Network]| {
        let offset = generation << 32;
        generation += 1;

        match setup.mode {
            FitnessMode::RoundRobin => {
                let mut config = setup.tournament.clone();
                config.seed = config.seed.wrapping_add(offset);
                Ok(run_tournament(population, &config)?.scores)
            }
            FitnessMode::Teach => {
                let mut config = setup.eval.clone();
                config.seed = config.seed.wrapping_add(offset);
                let results = evaluate_fitness(population, &config)?;
                Ok(results.iter().map(|r| r.fitness_score).collect())
            }
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_progress_bar(generations: u64, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let progress = ProgressBar::new(generations);
    progress.set_style(
        ProgressStyle::with_template("{elapsed_precise} [{bar:40}] {pos}/{len} gen {msg}")?
            .progress_chars("=> "),
    );
    Ok(progress)
}

fn print_json_results(result: &EvolutionResult, args: &EvolveArgs) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonStrategy<'a> {
        name: &'a str,
        fitness: f32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        generations_run: usize,
        pool_size: usize,
        save_file: String,
        best: Vec<JsonStrategy<'a>>,
        history: &'a [neurotac_evolve::GenerationStats],
    }

    let output = JsonOutput {
        generations_run: result.history.len(),
        pool_size: result.population.len(),
        save_file: args.save_file.display().to_string(),
        best: result
            .population
            .iter()
            .zip(&result.fitness)
            .take(args.save_size)
            .map(|(n, &fitness)| JsonStrategy {
                name: &n.name,
                fitness,
            })
            .collect(),
        history: &result.history,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_summary(result: &EvolutionResult, args: &EvolveArgs) {
    println!("\n=== Evolution Complete ===");
    println!("Generations: {}", result.history.len());
    println!("Pool size:   {}", result.population.len());
    println!(
        "Best fitness: {:.4}",
        result.fitness.first().copied().unwrap_or(0.0)
    );
    println!(
        "Final avg fitness: {:.4}",
        result.fitness.iter().sum::<f32>() / result.fitness.len().max(1) as f32
    );
    println!("Saved to: {}", args.save_file.display());

    for (i, (network, fitness)) in result
        .population
        .iter()
        .zip(&result.fitness)
        .take(args.save_size)
        .enumerate()
    {
        println!("{:>3}. {:<24} {:.3}", i + 1, network.name, fitness);
    }
}
