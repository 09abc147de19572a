//! A single candidate solution: a binary chromosome plus cached fitness.

use crate::error::GaError;
use rand::Rng;

/// Sentinel fitness marking an individual that has not been evaluated yet.
pub const UNEVALUATED_FITNESS: f64 = -1.0;

/// A candidate solution in the population.
///
/// The chromosome is an ordered sequence of binary genes (`0` or `1`).
/// Its length is fixed at construction and never changes. Fitness is a
/// cached score in `[0, 1]` for the one-max problem — the fraction of
/// genes equal to `1` — and starts at [`UNEVALUATED_FITNESS`] until the
/// engine evaluates it. Fitness is always recomputed from the chromosome,
/// never incrementally updated.
///
/// # Examples
///
/// ```
/// use onemax_ga::Individual;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(42);
/// let ind = Individual::random(8, &mut rng);
/// assert_eq!(ind.len(), 8);
/// assert!(!ind.is_evaluated());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    genes: Vec<u8>,
    fitness: f64,
}

impl Individual {
    /// Creates an individual with `chromosome_length` genes, each
    /// independently `0` or `1` with probability 0.5.
    ///
    /// Length 0 is valid and yields an empty-chromosome placeholder,
    /// used by scratch populations that are filled in positionally.
    pub fn random<R: Rng>(chromosome_length: usize, rng: &mut R) -> Self {
        let genes = (0..chromosome_length)
            .map(|_| if rng.random_bool(0.5) { 1 } else { 0 })
            .collect();
        Self {
            genes,
            fitness: UNEVALUATED_FITNESS,
        }
    }

    /// Creates an unevaluated individual from an explicit gene sequence.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidParameter`] if any gene is not `0` or `1`.
    pub fn from_genes(genes: Vec<u8>) -> Result<Self, GaError> {
        if let Some(&bad) = genes.iter().find(|&&g| g > 1) {
            return Err(GaError::param(
                "gene",
                bad as f64,
                "genes must be 0 or 1",
            ));
        }
        Ok(Self {
            genes,
            fitness: UNEVALUATED_FITNESS,
        })
    }

    /// Number of genes in the chromosome.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome is empty (a scratch placeholder).
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Reads the gene at `index`.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidIndex`] if `index` is out of bounds.
    pub fn gene(&self, index: usize) -> Result<u8, GaError> {
        self.genes.get(index).copied().ok_or(GaError::InvalidIndex {
            index,
            len: self.genes.len(),
        })
    }

    /// Writes the gene at `index`.
    ///
    /// # Errors
    /// Returns [`GaError::InvalidIndex`] if `index` is out of bounds, or
    /// [`GaError::InvalidParameter`] if `value` is not `0` or `1`.
    pub fn set_gene(&mut self, index: usize, value: u8) -> Result<(), GaError> {
        if value > 1 {
            return Err(GaError::param(
                "gene",
                value as f64,
                "genes must be 0 or 1",
            ));
        }
        let len = self.genes.len();
        match self.genes.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(GaError::InvalidIndex { index, len }),
        }
    }

    /// Iterates over the genes in chromosome order.
    pub fn genes(&self) -> impl Iterator<Item = u8> + '_ {
        self.genes.iter().copied()
    }

    /// The cached fitness score.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Stores a fitness score, replacing the cached value.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Whether this individual has been evaluated since construction.
    pub fn is_evaluated(&self) -> bool {
        self.fitness != UNEVALUATED_FITNESS
    }
}

impl std::fmt::Display for Individual {
    /// Renders the chromosome as a concatenated bit string, e.g. `10110`.
    ///
    /// Display only; never used in algorithmic decisions.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &g in &self.genes {
            write!(f, "{g}")?;
        }
        Ok(())
    }
}
