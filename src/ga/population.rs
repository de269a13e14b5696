//! The growing population of chromosomes.

use super::chromosome::Chromosome;
use super::operators::scramble;
use rand::Rng;

/// Ordered collection of chromosomes for one run.
///
/// Offspring are appended in production order and nothing is ever
/// removed, so indices stay stable for the whole run.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Chromosome>,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds `size` chromosomes for an `n`×`n` board.
    ///
    /// Each starts as the identity placement and is scrambled by a number
    /// of random swaps drawn uniformly from `shuffles` (inclusive), then
    /// evaluated.
    pub fn seed<R: Rng>(
        n: usize,
        size: usize,
        shuffles: (usize, usize),
        rng: &mut R,
    ) -> Self {
        let (min_shuffles, max_shuffles) = shuffles;
        let members = (0..size)
            .map(|_| {
                let mut chromosome = Chromosome::identity(n);
                let swaps = rng.random_range(min_shuffles..=max_shuffles);
                scramble(chromosome.genes_mut(), swaps, rng);
                chromosome.evaluate();
                chromosome
            })
            .collect();
        Self { members }
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the population holds no chromosomes.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Appends a chromosome, returning its index.
    pub fn push(&mut self, chromosome: Chromosome) -> usize {
        self.members.push(chromosome);
        self.members.len() - 1
    }

    /// The chromosome at `index`.
    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.members.get(index)
    }

    /// All chromosomes in insertion order.
    pub fn as_slice(&self) -> &[Chromosome] {
        &self.members
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Chromosome] {
        &mut self.members
    }

    /// Iterates over the chromosomes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.members.iter()
    }

    /// Lowest and highest conflict counts, or `None` if empty.
    pub fn conflict_range(&self) -> Option<(usize, usize)> {
        min_max_by_key(&self.members, Chromosome::conflicts)
    }

    /// Returns `true` if any chromosome has zero conflicts.
    pub fn has_solution(&self) -> bool {
        self.members.iter().any(Chromosome::is_solution)
    }

    /// Every zero-conflict chromosome, in population order.
    pub fn solutions(&self) -> impl Iterator<Item = &Chromosome> {
        self.members.iter().filter(|c| c.is_solution())
    }

    /// Indices of chromosomes currently marked for breeding.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_selected())
            .map(|(i, _)| i)
            .collect()
    }

    /// Clears every breeding mark ahead of the next epoch.
    pub fn clear_selection(&mut self) {
        for chromosome in &mut self.members {
            chromosome.set_selected(false);
        }
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Chromosome;
    type IntoIter = std::slice::Iter<'a, Chromosome>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Smallest and largest key over `items`, or `None` if `items` is empty.
///
/// The ordering comes from `key` rather than from an `Ord` impl on the
/// item, so callers can rank the same items by different measures.
pub fn min_max_by_key<T, K, F>(items: &[T], key: F) -> Option<(K, K)>
where
    K: Ord + Copy,
    F: Fn(&T) -> K,
{
    let mut keys = items.iter().map(key);
    let first = keys.next()?;
    Some(keys.fold((first, first), |(lo, hi), k| (lo.min(k), hi.max(k))))
}
