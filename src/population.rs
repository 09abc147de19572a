//! Population storage and fitness-ranked access.

use crate::error::GaError;
use crate::individual::Individual;
use rand::seq::SliceRandom;
use rand::Rng;

/// Aggregate fitness sentinel for a population that has not been evaluated.
pub const UNEVALUATED_POPULATION_FITNESS: f64 = -1.0;

/// A collection of [`Individual`]s plus their aggregate fitness.
///
/// Storage order is insertion order and is never perturbed by reads:
/// ranked access goes through a separately computed index view (see
/// [`ranked_indices`](Population::ranked_indices)), so positional access
/// via [`individual`](Population::individual) stays stable across
/// [`fittest`](Population::fittest) calls.
///
/// Each generation's population fully replaces the prior one; the engine
/// produces new populations from scratch containers rather than mutating
/// a generation in place.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    population_fitness: f64,
}

impl Population {
    /// Creates a population of `size` random individuals with the given
    /// chromosome length.
    pub fn random<R: Rng>(size: usize, chromosome_length: usize, rng: &mut R) -> Self {
        let individuals = (0..size)
            .map(|_| Individual::random(chromosome_length, rng))
            .collect();
        Self {
            individuals,
            population_fitness: UNEVALUATED_POPULATION_FITNESS,
        }
    }

    /// Creates a scratch population of `size` empty-chromosome placeholders.
    ///
    /// Used as the output container for crossover and mutation, which fill
    /// every slot via [`set_individual`](Population::set_individual).
    pub fn scratch(size: usize) -> Self {
        let empty = Individual::from_genes(Vec::new()).expect("empty chromosome is valid");
        Self {
            individuals: vec![empty; size],
            population_fitness: UNEVALUATED_POPULATION_FITNESS,
        }
    }

    /// Number of individuals.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the population holds no individuals.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// The individuals in storage order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mutable iteration over the individuals in storage order.
    pub fn individuals_mut(&mut self) -> impl Iterator<Item = &mut Individual> {
        self.individuals.iter_mut()
    }

    /// Positional read, bypassing fitness order.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidIndex`] if `index >= len()`.
    pub fn individual(&self, index: usize) -> Result<&Individual, GaError> {
        self.individuals.get(index).ok_or(GaError::InvalidIndex {
            index,
            len: self.individuals.len(),
        })
    }

    /// Positional write, bypassing fitness order.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidIndex`] if `index >= len()`.
    pub fn set_individual(&mut self, index: usize, individual: Individual) -> Result<(), GaError> {
        let len = self.individuals.len();
        match self.individuals.get_mut(index) {
            Some(slot) => {
                *slot = individual;
                Ok(())
            }
            None => Err(GaError::InvalidIndex { index, len }),
        }
    }

    /// Storage indices sorted by fitness descending (best first).
    ///
    /// The sort is stable: individuals with equal fitness keep their
    /// relative storage order. Storage itself is not reordered.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.individuals.len()).collect();
        indices.sort_by(|&a, &b| {
            self.individuals[b]
                .fitness()
                .partial_cmp(&self.individuals[a].fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        indices
    }

    /// The individual at sorted position `rank` (0 = highest fitness).
    ///
    /// Ranking uses current fitness values at call time.
    ///
    /// # Errors
    /// Returns [`GaError::EmptyPopulation`] on an empty population, or
    /// [`GaError::InvalidIndex`] if `rank >= len()`.
    pub fn fittest(&self, rank: usize) -> Result<&Individual, GaError> {
        if self.individuals.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        let ranked = self.ranked_indices();
        let idx = *ranked.get(rank).ok_or(GaError::InvalidIndex {
            index: rank,
            len: self.individuals.len(),
        })?;
        Ok(&self.individuals[idx])
    }

    /// Aggregate (summed) fitness of the population.
    pub fn population_fitness(&self) -> f64 {
        self.population_fitness
    }

    /// Stores the aggregate fitness.
    pub fn set_population_fitness(&mut self, fitness: f64) {
        self.population_fitness = fitness;
    }

    /// In-place uniform random permutation of storage order.
    ///
    /// Utility for callers; the evolution loop itself never shuffles.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.individuals.shuffle(rng);
    }
}
