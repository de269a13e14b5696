//! Permutation-encoded candidate placements.
//!
//! A [`Chromosome`] stores one queen per row: `genes[row]` is the column
//! of that row's queen. Because the genes are always a permutation of
//! `0..n`, no two queens ever share a row or a column, and the only
//! conflicts left to count are diagonal ones.

use super::conflicts::count_diagonal_conflicts;

/// One candidate solution in the population.
///
/// `conflicts` is only meaningful after [`evaluate`](Chromosome::evaluate)
/// has run on the current genes. Operators that touch the genes leave
/// re-evaluation to the caller so that crossover and a scheduled mutation
/// can share a single evaluation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Vec<usize>,
    conflicts: usize,
    fitness: f64,
    selected: bool,
    selection_probability: f64,
}

impl Chromosome {
    /// Creates the identity placement `genes[i] = i` (all queens on the
    /// main diagonal), already evaluated.
    pub fn identity(n: usize) -> Self {
        let mut chromosome = Self::unevaluated((0..n).collect());
        chromosome.evaluate();
        chromosome
    }

    /// Creates a chromosome from an explicit placement and evaluates it.
    ///
    /// Returns `None` if `genes` is not a permutation of `0..genes.len()`.
    pub fn from_genes(genes: Vec<usize>) -> Option<Self> {
        if !is_permutation(&genes) {
            return None;
        }
        let mut chromosome = Self::unevaluated(genes);
        chromosome.evaluate();
        Some(chromosome)
    }

    /// Wraps genes produced by a permutation-preserving operator.
    ///
    /// The conflict count is left at zero until [`evaluate`](Self::evaluate)
    /// is called.
    pub(crate) fn unevaluated(genes: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&genes), "genes must be a permutation");
        Self {
            genes,
            conflicts: 0,
            fitness: 0.0,
            selected: false,
            selection_probability: 0.0,
        }
    }

    /// Board size `n`.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` for the zero-sized board.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// The column of each row's queen.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    pub(crate) fn genes_mut(&mut self) -> &mut [usize] {
        &mut self.genes
    }

    /// Consumes the chromosome, returning its placement.
    pub fn into_genes(self) -> Vec<usize> {
        self.genes
    }

    /// Diagonal conflicts, counted once from each queen of an attacking
    /// pair.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    /// Returns `true` if no two queens attack each other.
    pub fn is_solution(&self) -> bool {
        self.conflicts == 0
    }

    /// Recomputes the conflict count from the current genes.
    pub fn evaluate(&mut self) {
        self.conflicts = count_diagonal_conflicts(&self.genes);
    }

    /// Population-relative fitness in `[0, 100]`, higher is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub(crate) fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Whether this chromosome is eligible to breed in the current epoch.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Share of the roulette wheel, as a percentage of total fitness.
    pub fn selection_probability(&self) -> f64 {
        self.selection_probability
    }

    pub(crate) fn set_selection_probability(&mut self, probability: f64) {
        self.selection_probability = probability;
    }
}

/// Checks that `genes` holds each value of `0..genes.len()` exactly once.
pub fn is_permutation(genes: &[usize]) -> bool {
    let n = genes.len();
    let mut seen = vec![false; n];
    for &g in genes {
        if g >= n || seen[g] {
            return false;
        }
        seen[g] = true;
    }
    true
}
