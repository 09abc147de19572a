//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop,
//! and [`Compat`] selects between corrected operator semantics and literal
//! reproduction of the legacy solver's quirks.

use crate::error::GaError;

/// Operator semantics mode.
///
/// The legacy solver this crate descends from carries three defects:
/// an unnormalized roulette wheel (the draw is taken from `[0, 1)` while
/// cumulative fitness may exceed 1, biasing selection toward individuals
/// early in storage order), elitism enforced in mutation but not in
/// crossover, and a mutation "flip" that always writes `1` regardless of
/// the old gene value. [`Corrected`](Compat::Corrected) fixes all three;
/// [`Legacy`](Compat::Legacy) reproduces them exactly for parity testing
/// against historical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Compat {
    /// Normalized roulette wheel, elitism applied to both crossover and
    /// mutation, genuine gene toggling (`1 - gene`). The default.
    #[default]
    Corrected,
    /// Unnormalized roulette wheel, elitism in mutation only (exempting
    /// ranks `<= elitism_count`), mutation always setting the gene to `1`.
    Legacy,
}

/// Configuration for the one-max genetic algorithm.
///
/// Immutable per run. Rates outside `[0, 1]`, zero sizes, and an elitism
/// count that covers the whole population are rejected by
/// [`validate`](GaConfig::validate) rather than silently clamped.
///
/// # Defaults
///
/// ```
/// use onemax_ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.chromosome_length, 50);
/// assert_eq!(config.elitism_count, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use onemax_ga::{Compat, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_mutation_rate(0.01)
///     .with_compat(Compat::Legacy)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Number of genes per chromosome.
    pub chromosome_length: usize,

    /// Probability that an individual gene mutates in a given generation
    /// (0.0–1.0). Generally small, on the order of 0.1 or less.
    pub mutation_rate: f64,

    /// Probability that an individual crosses over with a second parent
    /// (0.0–1.0). When crossover is not applied, the individual is copied
    /// through unchanged.
    pub crossover_rate: f64,

    /// Number of top-ranked individuals exempt from the stochastic
    /// operators each generation.
    pub elitism_count: usize,

    /// Operator semantics; see [`Compat`].
    pub compat: Compat,

    /// Optional generation cap.
    ///
    /// The termination condition is a perfect individual; `None` runs
    /// until one appears, which for pathological rates may be never.
    /// Callers wanting a guard set this.
    pub max_generations: Option<usize>,

    /// Random seed for reproducibility. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            chromosome_length: 50,
            mutation_rate: 0.001,
            crossover_rate: 0.95,
            elitism_count: 2,
            compat: Compat::default(),
            max_generations: None,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the chromosome length.
    pub fn with_chromosome_length(mut self, n: usize) -> Self {
        self.chromosome_length = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the elitism count.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Sets the operator semantics mode.
    pub fn with_compat(mut self, compat: Compat) -> Self {
        self.compat = compat;
        self
    }

    /// Sets the generation cap (`None` = unbounded).
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidParameter`] describing the first invalid
    /// parameter found.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::param(
                "population_size",
                0.0,
                "must be at least 1",
            ));
        }
        if self.chromosome_length == 0 {
            return Err(GaError::param(
                "chromosome_length",
                0.0,
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::param(
                "mutation_rate",
                self.mutation_rate,
                "must be within [0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GaError::param(
                "crossover_rate",
                self.crossover_rate,
                "must be within [0, 1]",
            ));
        }
        if self.elitism_count >= self.population_size {
            return Err(GaError::param(
                "elitism_count",
                self.elitism_count as f64,
                "elites would fill the entire population",
            ));
        }
        if self.max_generations == Some(0) {
            return Err(GaError::param(
                "max_generations",
                0.0,
                "must be positive or None",
            ));
        }
        Ok(())
    }
}
