//! Genetic algorithm for the one-max binary string problem.
//!
//! Evolves a fixed-length binary chromosome toward all-ones, demonstrating
//! the full generational cycle: population initialization, fitness
//! evaluation, roulette-wheel selection, uniform crossover, per-gene
//! mutation, and elitism.
//!
//! # Key Types
//!
//! - [`Individual`]: a binary chromosome with cached fitness
//! - [`Population`]: storage plus fitness-ranked access
//! - [`GaEngine`]: the evolutionary operators
//! - [`GaConfig`]: run parameters, with [`Compat`] selecting corrected or
//!   legacy operator semantics
//! - [`GaRunner`]: the packaged generational loop, returning [`GaResult`]
//!
//! The fitness function and operators are hardwired to one-max; this crate
//! is an illustrative solver, not a general GA framework.
//!
//! # Example
//!
//! ```
//! use onemax_ga::{GaConfig, GaRunner};
//!
//! let config = GaConfig::default()
//!     .with_population_size(30)
//!     .with_chromosome_length(10)
//!     .with_mutation_rate(0.01)
//!     .with_max_generations(5_000)
//!     .with_seed(42);
//!
//! let result = GaRunner::run(&config)?;
//! assert_eq!(result.best.to_string(), "1111111111");
//! # Ok::<(), onemax_ga::GaError>(())
//! ```
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

mod config;
mod engine;
mod error;
mod individual;
mod population;
mod runner;

pub use config::{Compat, GaConfig};
pub use engine::GaEngine;
pub use error::GaError;
pub use individual::{Individual, UNEVALUATED_FITNESS};
pub use population::{Population, UNEVALUATED_POPULATION_FITNESS};
pub use runner::{GaResult, GaRunner};
