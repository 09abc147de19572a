//! The evolution engine: fitness evaluation, selection, crossover, mutation.
//!
//! [`GaEngine`] holds the run parameters and exposes the population-level
//! operations the evolutionary loop is built from. The fitness function and
//! operators are hardwired to the one-max binary problem; this is not a
//! general-purpose GA framework.

use crate::config::{Compat, GaConfig};
use crate::error::GaError;
use crate::individual::Individual;
use crate::population::Population;
use rand::Rng;

/// One-max genetic algorithm engine.
///
/// Parameters are fixed at construction and read-only afterwards. All
/// stochastic operations take an explicit `&mut R: Rng`, so runs are
/// deterministic given a seeded generator.
///
/// # Usage
///
/// ```
/// use onemax_ga::{GaConfig, GaEngine};
/// use rand::SeedableRng;
///
/// let engine = GaEngine::new(GaConfig::default().with_chromosome_length(20))?;
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let mut population = engine.init_population(&mut rng);
/// engine.eval_population(&mut population);
/// # Ok::<(), onemax_ga::GaError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GaEngine {
    config: GaConfig,
}

impl GaEngine {
    /// Creates an engine with the given configuration.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidParameter`] if the configuration fails
    /// [`GaConfig::validate`].
    pub fn new(config: GaConfig) -> Result<Self, GaError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The engine's configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Creates the initial population: `population_size` random individuals
    /// with `chromosome_length` genes each.
    pub fn init_population<R: Rng>(&self, rng: &mut R) -> Population {
        Population::random(self.config.population_size, self.config.chromosome_length, rng)
    }

    /// Computes an individual's fitness, stores it on the individual, and
    /// returns it.
    ///
    /// Fitness is the fraction of genes equal to `1`. The zero-ones case
    /// short-circuits to exactly 0.0, which also covers the empty scratch
    /// chromosome where the quotient would be 0/0.
    pub fn calc_fitness(&self, individual: &mut Individual) -> f64 {
        let ones = individual.genes().filter(|&g| g == 1).count();
        let fitness = if ones == 0 {
            0.0
        } else {
            ones as f64 / individual.len() as f64
        };
        individual.set_fitness(fitness);
        fitness
    }

    /// Evaluates every individual and stores the summed fitness as the
    /// population's aggregate.
    pub fn eval_population(&self, population: &mut Population) {
        let mut total = 0.0;
        for individual in population.individuals_mut() {
            total += self.calc_fitness(individual);
        }
        population.set_population_fitness(total);
    }

    /// Whether the population contains a perfect solution.
    ///
    /// Exact floating-point equality is intentional: fitness is
    /// ones/length, so 1.0 is reached exactly when every gene is `1`.
    pub fn termination_met(&self, population: &Population) -> bool {
        population.individuals().iter().any(|i| i.fitness() == 1.0)
    }

    /// Fitness-proportionate ("roulette wheel") parent selection.
    ///
    /// Walks the population in storage order accumulating fitness and
    /// returns the first individual whose cumulative sum exceeds the
    /// random threshold; if none does, the last individual in storage
    /// order wins.
    ///
    /// Under [`Compat::Corrected`] the draw is scaled by the aggregate
    /// population fitness. Under [`Compat::Legacy`] the raw cumulative sum
    /// is compared against a draw from `[0, 1)`, reproducing the legacy
    /// unnormalized wheel that favors individuals early in storage order.
    ///
    /// # Errors
    /// Returns [`GaError::EmptyPopulation`] on an empty population.
    pub fn select_parent<'a, R: Rng>(
        &self,
        population: &'a Population,
        rng: &mut R,
    ) -> Result<&'a Individual, GaError> {
        if population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }

        let threshold = match self.config.compat {
            Compat::Corrected => {
                rng.random_range(0.0..1.0) * population.population_fitness()
            }
            Compat::Legacy => rng.random_range(0.0..1.0),
        };

        let mut wheel = 0.0;
        for individual in population.individuals() {
            wheel += individual.fitness();
            if wheel > threshold {
                return Ok(individual);
            }
        }
        Ok(population
            .individuals()
            .last()
            .expect("population checked non-empty"))
    }

    /// Produces the next population by uniform crossover.
    ///
    /// Positions are filled in fitness-descending order. Each individual
    /// crosses over with probability `crossover_rate`: a second parent is
    /// drawn by [`select_parent`](GaEngine::select_parent) and each
    /// offspring gene is copied from either parent with probability 0.5.
    /// Otherwise the individual is copied through unchanged.
    ///
    /// Under [`Compat::Corrected`] the top `elitism_count` ranks are copied
    /// through before the coin flip; under [`Compat::Legacy`] crossover
    /// applies no elitism exemption at all.
    ///
    /// # Errors
    /// Returns [`GaError::EmptyPopulation`] on an empty population.
    pub fn crossover_population<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<Population, GaError> {
        if population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }

        let ranked = population.ranked_indices();
        let mut next = Population::scratch(population.len());

        for (rank, &idx) in ranked.iter().enumerate() {
            let parent1 = &population.individuals()[idx];

            let elite =
                self.config.compat == Compat::Corrected && rank < self.config.elitism_count;

            if !elite && self.config.crossover_rate > rng.random_range(0.0..1.0) {
                let parent2 = self.select_parent(population, rng)?;
                let genes = parent1
                    .genes()
                    .zip(parent2.genes())
                    .map(|(g1, g2)| if rng.random_bool(0.5) { g1 } else { g2 })
                    .collect();
                next.set_individual(rank, Individual::from_genes(genes)?)?;
            } else {
                next.set_individual(rank, parent1.clone())?;
            }
        }

        Ok(next)
    }

    /// Produces the next population by per-gene mutation.
    ///
    /// Positions are filled in fitness-descending order. Each eligible
    /// gene mutates with probability `mutation_rate`.
    ///
    /// Under [`Compat::Corrected`] individuals at rank `>= elitism_count`
    /// are eligible and a triggered mutation toggles the gene
    /// (`1 - gene`). Under [`Compat::Legacy`] only ranks strictly greater
    /// than `elitism_count` are eligible and a triggered mutation always
    /// writes `1`, so a set gene is never flipped back to `0`.
    ///
    /// # Errors
    /// Returns [`GaError::EmptyPopulation`] on an empty population, or
    /// [`GaError::InvalidIndex`] if the input population is smaller than
    /// the configured population size.
    pub fn mutate_population<R: Rng>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> Result<Population, GaError> {
        if population.is_empty() {
            return Err(GaError::EmptyPopulation);
        }

        let ranked = population.ranked_indices();
        let mut next = Population::scratch(self.config.population_size);

        for rank in 0..self.config.population_size {
            let &idx = ranked.get(rank).ok_or(GaError::InvalidIndex {
                index: rank,
                len: population.len(),
            })?;
            let mut individual = population.individuals()[idx].clone();

            let eligible = match self.config.compat {
                Compat::Corrected => rank >= self.config.elitism_count,
                Compat::Legacy => rank > self.config.elitism_count,
            };

            if eligible {
                for gene_index in 0..individual.len() {
                    if self.config.mutation_rate > rng.random_range(0.0..1.0) {
                        let new_gene = match self.config.compat {
                            Compat::Corrected => 1 - individual.gene(gene_index)?,
                            Compat::Legacy => 1,
                        };
                        individual.set_gene(gene_index, new_gene)?;
                    }
                }
            }

            next.set_individual(rank, individual)?;
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine(config: GaConfig) -> GaEngine {
        GaEngine::new(config).unwrap()
    }

    fn small_engine() -> GaEngine {
        engine(
            GaConfig::default()
                .with_population_size(4)
                .with_chromosome_length(3)
                .with_elitism_count(1),
        )
    }

    fn evaluated_population(engine: &GaEngine, genes: &[Vec<u8>]) -> Population {
        let mut pop = Population::scratch(genes.len());
        for (i, g) in genes.iter().enumerate() {
            pop.set_individual(i, Individual::from_genes(g.clone()).unwrap())
                .unwrap();
        }
        engine.eval_population(&mut pop);
        pop
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = GaEngine::new(GaConfig::default().with_mutation_rate(2.0)).unwrap_err();
        assert!(matches!(err, GaError::InvalidParameter { .. }));
    }

    #[test]
    fn test_config_accessor_round_trips() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(12)
                .with_chromosome_length(6)
                .with_elitism_count(3),
        );
        assert_eq!(engine.config().population_size, 12);
        assert_eq!(engine.config().chromosome_length, 6);
        assert_eq!(engine.config().elitism_count, 3);
    }

    #[test]
    fn test_init_population_dimensions() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(10)
                .with_chromosome_length(7),
        );
        let mut rng = StdRng::seed_from_u64(42);
        let pop = engine.init_population(&mut rng);
        assert_eq!(pop.len(), 10);
        assert!(pop.individuals().iter().all(|i| i.len() == 7));
    }

    #[test]
    fn test_calc_fitness_stores_fraction_of_ones() {
        let engine = small_engine();
        let mut ind = Individual::from_genes(vec![1, 1, 0, 1]).unwrap();
        let fitness = engine.calc_fitness(&mut ind);
        assert!((fitness - 0.75).abs() < 1e-15);
        assert!((ind.fitness() - 0.75).abs() < 1e-15);
    }

    #[test]
    fn test_calc_fitness_all_zeros() {
        let engine = small_engine();
        let mut ind = Individual::from_genes(vec![0, 0, 0]).unwrap();
        assert_eq!(engine.calc_fitness(&mut ind), 0.0);
        assert_eq!(ind.fitness(), 0.0);
    }

    #[test]
    fn test_calc_fitness_idempotent() {
        let engine = small_engine();
        let mut ind = Individual::from_genes(vec![1, 0, 1]).unwrap();
        let first = engine.calc_fitness(&mut ind);
        let second = engine.calc_fitness(&mut ind);
        assert_eq!(first, second);
        assert_eq!(ind.fitness(), second);
    }

    #[test]
    fn test_eval_population_sums_fitness() {
        let engine = small_engine();
        let pop = evaluated_population(
            &engine,
            &[vec![1, 1, 1], vec![1, 0, 0], vec![0, 0, 0], vec![1, 1, 0]],
        );
        // 1.0 + 1/3 + 0.0 + 2/3 = 2.0
        assert!((pop.population_fitness() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_termination_requires_exact_one() {
        let engine = small_engine();

        let all_zero = evaluated_population(
            &engine,
            &[vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0], vec![0, 0, 0]],
        );
        assert!(!engine.termination_met(&all_zero));

        let near_perfect = evaluated_population(
            &engine,
            &[vec![1, 1, 0], vec![1, 0, 1], vec![0, 1, 1], vec![1, 1, 0]],
        );
        assert!(!engine.termination_met(&near_perfect));

        let perfect = evaluated_population(
            &engine,
            &[vec![1, 1, 0], vec![1, 1, 1], vec![0, 0, 0], vec![1, 0, 0]],
        );
        assert!(engine.termination_met(&perfect));
    }

    #[test]
    fn test_fittest_finds_perfect_solution() {
        let engine = small_engine();
        let pop = evaluated_population(
            &engine,
            &[vec![1, 0, 0], vec![1, 1, 1], vec![0, 1, 0], vec![0, 0, 1]],
        );
        assert!(engine.termination_met(&pop));
        assert_eq!(pop.fittest(0).unwrap().to_string(), "111");
    }

    #[test]
    fn test_select_parent_empty_population() {
        let engine = small_engine();
        let pop = Population::scratch(0);
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            engine.select_parent(&pop, &mut rng),
            Err(GaError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_select_parent_legacy_saturates_on_first_full_fitness() {
        // With an unnormalized wheel, a leading fitness-1.0 individual
        // absorbs every draw from [0, 1).
        let engine = engine(
            GaConfig::default()
                .with_population_size(4)
                .with_chromosome_length(3)
                .with_compat(Compat::Legacy),
        );
        let pop = evaluated_population(
            &engine,
            &[vec![1, 1, 1], vec![1, 1, 0], vec![1, 0, 1], vec![0, 1, 1]],
        );
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let parent = engine.select_parent(&pop, &mut rng).unwrap();
            assert_eq!(parent.to_string(), "111");
        }
    }

    #[test]
    fn test_select_parent_corrected_reaches_late_individuals() {
        // Normalizing the draw by total fitness spreads selection across
        // the whole wheel instead of saturating on the front.
        let engine = small_engine();
        let pop = evaluated_population(
            &engine,
            &[vec![1, 1, 1], vec![1, 1, 0], vec![1, 0, 1], vec![0, 1, 1]],
        );
        let mut rng = StdRng::seed_from_u64(42);
        let mut selected_later = false;
        for _ in 0..200 {
            let parent = engine.select_parent(&pop, &mut rng).unwrap();
            if parent.to_string() != "111" {
                selected_later = true;
            }
        }
        assert!(selected_later, "normalized wheel should pass the first slot");
    }

    #[test]
    fn test_select_parent_fallback_returns_last() {
        // All-zero fitness: the wheel never exceeds the threshold.
        let engine = engine(
            GaConfig::default()
                .with_population_size(3)
                .with_chromosome_length(2)
                .with_elitism_count(0)
                .with_compat(Compat::Legacy),
        );
        let pop = evaluated_population(&engine, &[vec![0, 0], vec![0, 0], vec![0, 0]]);
        let mut rng = StdRng::seed_from_u64(42);
        let parent = engine.select_parent(&pop, &mut rng).unwrap();
        assert!(std::ptr::eq(parent, pop.individual(2).unwrap()));
    }

    #[test]
    fn test_crossover_preserves_size_and_lengths() {
        let engine = small_engine();
        let mut rng = StdRng::seed_from_u64(42);
        let mut pop = engine.init_population(&mut rng);
        engine.eval_population(&mut pop);

        let next = engine.crossover_population(&pop, &mut rng).unwrap();
        assert_eq!(next.len(), 4);
        assert!(next.individuals().iter().all(|i| i.len() == 3));
    }

    #[test]
    fn test_crossover_rate_zero_copies_ranked_parents() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(4)
                .with_chromosome_length(3)
                .with_crossover_rate(0.0),
        );
        let pop = evaluated_population(
            &engine,
            &[vec![1, 0, 0], vec![1, 1, 1], vec![0, 0, 0], vec![1, 1, 0]],
        );
        let mut rng = StdRng::seed_from_u64(42);
        let next = engine.crossover_population(&pop, &mut rng).unwrap();

        assert_eq!(next.individual(0).unwrap().to_string(), "111");
        assert_eq!(next.individual(1).unwrap().to_string(), "110");
        assert_eq!(next.individual(2).unwrap().to_string(), "100");
        assert_eq!(next.individual(3).unwrap().to_string(), "000");
    }

    #[test]
    fn test_crossover_corrected_exempts_elites() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(4)
                .with_chromosome_length(3)
                .with_crossover_rate(1.0)
                .with_elitism_count(2),
        );
        let pop = evaluated_population(
            &engine,
            &[vec![0, 0, 1], vec![1, 1, 1], vec![1, 1, 0], vec![0, 0, 0]],
        );
        let mut rng = StdRng::seed_from_u64(42);
        let next = engine.crossover_population(&pop, &mut rng).unwrap();

        // Top two ranks pass through untouched even at crossover rate 1.0.
        assert_eq!(next.individual(0).unwrap().to_string(), "111");
        assert_eq!(next.individual(1).unwrap().to_string(), "110");
    }

    #[test]
    fn test_crossover_offspring_genes_come_from_parents() {
        // Identical parents make the uniform gene choice observable: the
        // offspring must equal them regardless of the coin flips.
        let engine = engine(
            GaConfig::default()
                .with_population_size(3)
                .with_chromosome_length(4)
                .with_crossover_rate(1.0)
                .with_elitism_count(0)
                .with_compat(Compat::Legacy),
        );
        let pop = evaluated_population(
            &engine,
            &[vec![1, 0, 1, 0], vec![1, 0, 1, 0], vec![1, 0, 1, 0]],
        );
        let mut rng = StdRng::seed_from_u64(42);
        let next = engine.crossover_population(&pop, &mut rng).unwrap();
        for i in 0..3 {
            assert_eq!(next.individual(i).unwrap().to_string(), "1010");
        }
    }

    #[test]
    fn test_mutation_corrected_inverts_every_eligible_gene() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(3)
                .with_chromosome_length(4)
                .with_mutation_rate(1.0)
                .with_elitism_count(0),
        );
        let pop = evaluated_population(
            &engine,
            &[vec![1, 1, 0, 1], vec![1, 0, 0, 0], vec![0, 0, 0, 0]],
        );
        let mut rng = StdRng::seed_from_u64(42);
        let next = engine.mutate_population(&pop, &mut rng).unwrap();

        // Ranked order: 1101, 1000, 0000; every gene inverts.
        assert_eq!(next.individual(0).unwrap().to_string(), "0010");
        assert_eq!(next.individual(1).unwrap().to_string(), "0111");
        assert_eq!(next.individual(2).unwrap().to_string(), "1111");
    }

    #[test]
    fn test_mutation_corrected_exempts_elite_ranks() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(3)
                .with_chromosome_length(3)
                .with_mutation_rate(1.0)
                .with_elitism_count(1),
        );
        let pop = evaluated_population(
            &engine,
            &[vec![0, 1, 0], vec![1, 1, 0], vec![0, 0, 0]],
        );
        let mut rng = StdRng::seed_from_u64(42);
        let next = engine.mutate_population(&pop, &mut rng).unwrap();

        // Rank 0 (110) is elite; ranks 1 and 2 invert.
        assert_eq!(next.individual(0).unwrap().to_string(), "110");
        assert_eq!(next.individual(1).unwrap().to_string(), "101");
        assert_eq!(next.individual(2).unwrap().to_string(), "111");
    }

    #[test]
    fn test_mutation_legacy_always_writes_one() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(3)
                .with_chromosome_length(3)
                .with_mutation_rate(1.0)
                .with_elitism_count(0)
                .with_compat(Compat::Legacy),
        );
        let pop = evaluated_population(
            &engine,
            &[vec![1, 1, 0], vec![1, 0, 0], vec![0, 1, 0]],
        );
        let mut rng = StdRng::seed_from_u64(42);
        let next = engine.mutate_population(&pop, &mut rng).unwrap();

        // Legacy eligibility is rank > elitism_count, so rank 0 is exempt
        // even at elitism_count = 0; the rest are driven to all-ones.
        assert_eq!(next.individual(0).unwrap().to_string(), "110");
        assert_eq!(next.individual(1).unwrap().to_string(), "111");
        assert_eq!(next.individual(2).unwrap().to_string(), "111");
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(3)
                .with_chromosome_length(3)
                .with_mutation_rate(0.0)
                .with_elitism_count(0),
        );
        let pop = evaluated_population(
            &engine,
            &[vec![1, 1, 0], vec![0, 0, 1], vec![0, 1, 0]],
        );
        let mut rng = StdRng::seed_from_u64(42);
        let next = engine.mutate_population(&pop, &mut rng).unwrap();
        assert_eq!(next.individual(0).unwrap().to_string(), "110");
        assert_eq!(next.individual(1).unwrap().to_string(), "001");
        assert_eq!(next.individual(2).unwrap().to_string(), "010");
    }

    #[test]
    fn test_crossover_then_mutate_round_trip() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(8)
                .with_chromosome_length(5)
                .with_elitism_count(2),
        );
        let mut rng = StdRng::seed_from_u64(42);
        let mut pop = engine.init_population(&mut rng);
        engine.eval_population(&mut pop);

        let crossed = engine.crossover_population(&pop, &mut rng).unwrap();
        let mutated = engine.mutate_population(&crossed, &mut rng).unwrap();

        assert_eq!(mutated.len(), 8);
        assert!(mutated.individuals().iter().all(|i| i.len() == 5));
        assert!(mutated
            .individuals()
            .iter()
            .all(|i| i.genes().all(|g| g <= 1)));
    }

    #[test]
    fn test_operators_on_empty_population() {
        let engine = small_engine();
        let pop = Population::scratch(0);
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            engine.crossover_population(&pop, &mut rng),
            Err(GaError::EmptyPopulation)
        ));
        assert!(matches!(
            engine.mutate_population(&pop, &mut rng),
            Err(GaError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_mutate_rejects_undersized_population() {
        let engine = engine(
            GaConfig::default()
                .with_population_size(5)
                .with_chromosome_length(3)
                .with_elitism_count(0),
        );
        let pop = evaluated_population(&engine, &[vec![1, 0, 1], vec![0, 1, 0]]);
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            engine.mutate_population(&pop, &mut rng),
            Err(GaError::InvalidIndex { .. })
        ));
    }
}
