//! Population-relative fitness scaling.
//!
//! Fitness is a percentage: the chromosome with the fewest conflicts in the
//! current population scores 100, the one with the most scores 0, and
//! everything in between is placed linearly.

use super::population::Population;
use tracing::debug;

/// Fitness assigned to every chromosome when all conflict counts are equal.
pub const UNIFORM_FITNESS: f64 = 100.0;

/// How the last call to [`scale_fitness`] assigned scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaling {
    /// Scores spread linearly between the worst and best conflict counts.
    Linear,
    /// Every chromosome had the same conflict count and received
    /// [`UNIFORM_FITNESS`].
    Uniform,
    /// The population was empty; nothing was scored.
    Empty,
}

/// Rescales every chromosome's fitness from its conflict count.
///
/// With `worst = max(conflicts)` and `spread = worst - min(conflicts)`:
///
/// ```text
/// fitness = (worst - conflicts) * 100 / spread
/// ```
///
/// A zero spread would divide by zero; in that case every chromosome is
/// equally good and gets [`UNIFORM_FITNESS`].
pub fn scale_fitness(population: &mut Population) -> Scaling {
    let Some((best, worst)) = population.conflict_range() else {
        return Scaling::Empty;
    };
    let spread = worst - best;

    if spread == 0 {
        debug!(conflicts = worst, "uniform conflicts, assigning flat fitness");
        for chromosome in population.as_mut_slice() {
            chromosome.set_fitness(UNIFORM_FITNESS);
        }
        return Scaling::Uniform;
    }

    for chromosome in population.as_mut_slice() {
        let fitness = (worst - chromosome.conflicts()) as f64 * 100.0 / spread as f64;
        chromosome.set_fitness(fitness);
    }
    Scaling::Linear
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::chromosome::Chromosome;

    fn population_of(placements: &[&[usize]]) -> Population {
        let mut pop = Population::new();
        for genes in placements {
            pop.push(Chromosome::from_genes(genes.to_vec()).expect("valid permutation"));
        }
        pop
    }

    #[test]
    fn test_linear_scaling() {
        // conflicts: 12, 0, 8
        let mut pop = population_of(&[&[0, 1, 2, 3], &[1, 3, 0, 2], &[1, 0, 3, 2]]);
        assert_eq!(scale_fitness(&mut pop), Scaling::Linear);

        let fitness: Vec<f64> = pop.iter().map(Chromosome::fitness).collect();
        assert!((fitness[0] - 0.0).abs() < 1e-10);
        assert!((fitness[1] - 100.0).abs() < 1e-10);
        assert!((fitness[2] - 400.0 / 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_fitness_in_bounds() {
        let mut pop = population_of(&[
            &[0, 1, 2, 3, 4],
            &[4, 3, 2, 1, 0],
            &[1, 3, 0, 2, 4],
            &[0, 2, 4, 1, 3],
        ]);
        scale_fitness(&mut pop);
        for c in &pop {
            assert!(
                (0.0..=100.0).contains(&c.fitness()),
                "fitness {} out of bounds",
                c.fitness()
            );
        }
    }

    #[test]
    fn test_uniform_conflicts_fall_back() {
        let mut pop = population_of(&[&[0, 1, 2], &[2, 1, 0], &[0, 1, 2]]);
        assert_eq!(scale_fitness(&mut pop), Scaling::Uniform);
        for c in &pop {
            assert_eq!(c.fitness(), UNIFORM_FITNESS);
            assert!(c.fitness().is_finite());
        }
    }

    #[test]
    fn test_single_chromosome_is_uniform() {
        let mut pop = population_of(&[&[1, 3, 0, 2]]);
        assert_eq!(scale_fitness(&mut pop), Scaling::Uniform);
        assert_eq!(pop.as_slice()[0].fitness(), UNIFORM_FITNESS);
    }

    #[test]
    fn test_empty_population() {
        let mut pop = Population::new();
        assert_eq!(scale_fitness(&mut pop), Scaling::Empty);
    }
}
