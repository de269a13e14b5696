//! Fitness-proportionate (roulette wheel) parent selection.
//!
//! Each epoch a random number of parents is marked for breeding. Every
//! chromosome owns a slice of a 100-unit wheel proportional to its fitness;
//! an integer spin in `[0, 99]` picks the slice.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1

use super::population::Population;
use rand::Rng;
use tracing::trace;

/// Spins allowed per pick before falling back to the nearest unmarked
/// chromosome.
const MAX_RESPINS: usize = 32;

/// Marks between `range.0` and `range.1` (inclusive) distinct chromosomes
/// as selected and returns how many were marked.
///
/// Expects fitness to be scaled for the current epoch. Selection
/// probabilities are written back onto each chromosome as a percentage of
/// total fitness.
///
/// A spin that lands on an already-marked chromosome is re-spun, up to
/// [`MAX_RESPINS`] times; after that the nearest unmarked chromosome at or
/// after the landing slot is taken. The target is capped at the population
/// size, so every pick marks a new chromosome.
pub fn roulette_select<R: Rng>(
    population: &mut Population,
    range: (usize, usize),
    rng: &mut R,
) -> usize {
    let n = population.len();
    if n == 0 {
        return 0;
    }
    let target = rng.random_range(range.0..=range.1).min(n);

    assign_probabilities(population);
    let probabilities: Vec<f64> = population
        .iter()
        .map(|c| c.selection_probability())
        .collect();
    let members = population.as_mut_slice();

    for _ in 0..target {
        let mut landed = wheel_index(&probabilities, rng.random_range(0..=99u32) as f64);
        let mut respins = 0;
        while members[landed].is_selected() && respins < MAX_RESPINS {
            landed = wheel_index(&probabilities, rng.random_range(0..=99u32) as f64);
            respins += 1;
        }
        if members[landed].is_selected() {
            // target <= n, so an unmarked chromosome always remains
            landed = (landed..n)
                .chain(0..landed)
                .find(|&i| !members[i].is_selected())
                .unwrap_or(landed);
        }
        members[landed].set_selected(true);
    }

    target
}

/// Sets each chromosome's share of the wheel: `fitness / (total * 0.01)`.
///
/// Shares sum to 100. If total fitness is zero the wheel is split evenly.
fn assign_probabilities(population: &mut Population) {
    let n = population.len();
    let total: f64 = population.iter().map(|c| c.fitness()).sum::<f64>() * 0.01;
    for chromosome in population.as_mut_slice() {
        let probability = if total > 0.0 {
            chromosome.fitness() / total
        } else {
            100.0 / n as f64
        };
        chromosome.set_selection_probability(probability);
    }
}

/// Walks the wheel and returns the index chosen for `spin`.
///
/// At the first index `j` whose cumulative share reaches `spin`:
/// - `j == 0` selects 0,
/// - `j` at or past the last index selects the last index,
/// - otherwise the slot *before* the crossing, `j - 1`, is selected.
///
/// If rounding leaves the cumulative total short of `spin`, the last index
/// is selected.
pub(crate) fn wheel_index(probabilities: &[f64], spin: f64) -> usize {
    let last = probabilities.len().saturating_sub(1);
    let mut cumulative = 0.0;
    for (j, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative >= spin {
            return match j {
                0 => 0,
                j if j >= last => last,
                j => j - 1,
            };
        }
    }
    trace!(spin, cumulative, "wheel never crossed, taking last index");
    last
}
