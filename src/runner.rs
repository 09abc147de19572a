//! Packaged evolutionary loop.
//!
//! [`GaRunner`] wires the engine operations into the generational cycle:
//! initialize → evaluate → (crossover → mutate → evaluate) until a perfect
//! individual appears or the optional generation cap is hit.

use crate::config::GaConfig;
use crate::engine::GaEngine;
use crate::error::GaError;
use crate::individual::Individual;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The fittest individual in the final population.
    pub best: Individual,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Generation counter at the end of the run. The initial population
    /// counts as generation 1.
    pub generations: usize,

    /// Whether a perfect individual was found (as opposed to hitting the
    /// generation cap).
    pub solved: bool,

    /// Best fitness at the start of each generation, plus the final best.
    pub fitness_history: Vec<f64>,
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```
/// use onemax_ga::{GaConfig, GaRunner};
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_chromosome_length(10)
///     .with_mutation_rate(0.01)
///     .with_max_generations(5_000)
///     .with_seed(42);
/// let result = GaRunner::run(&config)?;
/// assert!(result.solved);
/// # Ok::<(), onemax_ga::GaError>(())
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA to completion.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidParameter`] for an invalid configuration.
    pub fn run(config: &GaConfig) -> Result<GaResult, GaError> {
        Self::run_with_observer(config, |_, _| {})
    }

    /// Runs the GA, invoking `observer` with the generation number and the
    /// current fittest individual at the start of every generation.
    ///
    /// The observer is the crate's logging seam; the `one_max` binary uses
    /// it for per-generation console output.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidParameter`] for an invalid configuration.
    pub fn run_with_observer<F>(config: &GaConfig, mut observer: F) -> Result<GaResult, GaError>
    where
        F: FnMut(usize, &Individual),
    {
        let engine = GaEngine::new(config.clone())?;
        let config = engine.config();

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut population = engine.init_population(&mut rng);
        engine.eval_population(&mut population);

        let mut generation = 1usize;
        let mut fitness_history = Vec::new();

        while !engine.termination_met(&population) {
            // Cap check comes first so a capped run never evolves past the
            // boundary: cap = 1 performs no crossover/mutate step at all.
            if config.max_generations.is_some_and(|cap| generation >= cap) {
                break;
            }

            let best = population.fittest(0)?;
            fitness_history.push(best.fitness());
            observer(generation, best);

            population = engine.crossover_population(&population, &mut rng)?;
            population = engine.mutate_population(&population, &mut rng)?;
            engine.eval_population(&mut population);

            generation += 1;
        }

        let solved = engine.termination_met(&population);
        let best = population.fittest(0)?.clone();
        fitness_history.push(best.fitness());

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations: generation,
            solved,
            fitness_history,
        })
    }
}
