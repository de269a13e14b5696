//! Permutation-preserving genetic operators.
//!
//! Every operator here maps permutations of `0..n` to permutations of
//! `0..n`, so a chromosome never acquires a row or column clash.
//!
//! # Crossover
//!
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), swap-repair form
//!
//! # Perturbation
//!
//! - [`scramble`]: bulk randomization used once when seeding a population
//! - [`exchange_mutation`]: the steady-state mutation event
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use crate::random::distinct_pair;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Draws two distinct crossover points in `0..n`, ordered `first < second`.
///
/// Returns `None` when `n < 2`.
pub fn crossover_points<R: Rng>(n: usize, rng: &mut R) -> Option<(usize, usize)> {
    let (a, b) = distinct_pair(n, rng)?;
    Some((a.min(b), a.max(b)))
}

/// Partially Mapped Crossover with random points.
///
/// Boards smaller than 2 have no distinct points; the offspring are then
/// plain copies of the parents.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn pmx_crossover<R: Rng>(
    parent_a: &[usize],
    parent_b: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    assert_eq!(parent_a.len(), parent_b.len(), "parents must have equal length");
    match crossover_points(parent_a.len(), rng) {
        Some(points) => pmx_with_points(parent_a, parent_b, points),
        None => (parent_a.to_vec(), parent_b.to_vec()),
    }
}

/// Partially Mapped Crossover over the inclusive segment `points.0..=points.1`.
///
/// # Algorithm
///
/// 1. Offspring 1 starts as a copy of `parent_a`, offspring 2 as a copy of
///    `parent_b`
/// 2. For each position `i` in the segment, take `x = parent_a[i]` and
///    `y = parent_b[i]`, then swap the cells holding `x` and `y` in both
///    offspring
///
/// Each step is a transposition, so both offspring stay permutations at
/// every point. Later swaps may move values placed by earlier ones; the
/// offspring are not guaranteed to carry the other parent's segment
/// verbatim.
///
/// # Complexity
/// O(n) time, O(n) space (position lookups are kept in inverse tables)
///
/// # Panics
/// Panics if parents differ in length or `points` is out of range.
pub fn pmx_with_points(
    parent_a: &[usize],
    parent_b: &[usize],
    points: (usize, usize),
) -> (Vec<usize>, Vec<usize>) {
    let n = parent_a.len();
    assert_eq!(n, parent_b.len(), "parents must have equal length");
    let (start, end) = (points.0.min(points.1), points.0.max(points.1));
    assert!(end < n, "crossover point {end} out of range for length {n}");

    let mut child1 = parent_a.to_vec();
    let mut child2 = parent_b.to_vec();
    let mut where1 = inverse(&child1);
    let mut where2 = inverse(&child2);

    for i in start..=end {
        let x = parent_a[i];
        let y = parent_b[i];
        if x == y {
            continue;
        }
        swap_values(&mut child1, &mut where1, x, y);
        swap_values(&mut child2, &mut where2, y, x);
    }

    (child1, child2)
}

/// `inv[value] = position` for a permutation.
fn inverse(perm: &[usize]) -> Vec<usize> {
    let mut inv = vec![0; perm.len()];
    for (pos, &value) in perm.iter().enumerate() {
        inv[value] = pos;
    }
    inv
}

/// Swaps the cells holding values `x` and `y`, keeping `inv` in step.
fn swap_values(perm: &mut [usize], inv: &mut [usize], x: usize, y: usize) {
    let (px, py) = (inv[x], inv[y]);
    perm.swap(px, py);
    inv.swap(x, y);
}

// ============================================================================
// Perturbation
// ============================================================================

/// Scrambles a permutation with `swaps` random distinct-position exchanges.
///
/// Used to randomize freshly seeded chromosomes. Does nothing when
/// `perm.len() < 2`.
pub fn scramble<R: Rng>(perm: &mut [usize], swaps: usize, rng: &mut R) {
    for _ in 0..swaps {
        swap_random_pair(perm, rng);
    }
}

/// Exchange mutation: `exchanges` random distinct-position swaps.
///
/// The engine applies this with a single exchange to scheduled offspring
/// and counts each call as one mutation event, whatever `exchanges` is.
///
/// # Complexity
/// O(exchanges)
pub fn exchange_mutation<R: Rng>(perm: &mut [usize], exchanges: usize, rng: &mut R) {
    for _ in 0..exchanges {
        swap_random_pair(perm, rng);
    }
}

fn swap_random_pair<R: Rng>(perm: &mut [usize], rng: &mut R) {
    if let Some((i, j)) = distinct_pair(perm.len(), rng) {
        perm.swap(i, j);
    }
}

// ============================================================================
// Tests
// ============================================================================
