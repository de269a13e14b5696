//! Diagonal conflict evaluation.

/// Row/column steps for the four diagonal directions.
const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (1, 1), (-1, 1), (1, -1)];

/// Counts diagonal attacks on the board described by `genes`.
///
/// From each queen, walks outward along all four diagonals until the edge
/// of the board and counts every queen met on the way. An attacking pair is
/// therefore counted twice, once from each end. Queens further along a
/// diagonal are counted too, even when another queen stands between them.
///
/// Rows and columns are never checked: `genes` is a permutation, so they
/// cannot collide.
///
/// # Complexity
/// O(n²)
pub fn count_diagonal_conflicts(genes: &[usize]) -> usize {
    let n = genes.len() as isize;
    let mut conflicts = 0;

    for (row, &col) in genes.iter().enumerate() {
        for &(dr, dc) in &DIAGONALS {
            let mut r = row as isize + dr;
            let mut c = col as isize + dc;
            while (0..n).contains(&r) && (0..n).contains(&c) {
                if genes[r as usize] == c as usize {
                    conflicts += 1;
                }
                r += dr;
                c += dc;
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_solutions_have_no_conflicts() {
        assert_eq!(count_diagonal_conflicts(&[1, 3, 0, 2]), 0);
        assert_eq!(count_diagonal_conflicts(&[2, 0, 3, 1]), 0);
        assert_eq!(count_diagonal_conflicts(&[0, 4, 7, 5, 2, 6, 1, 3]), 0);
    }

    #[test]
    fn test_pairs_counted_twice() {
        // . Q . .
        // Q . . .
        // . . . Q
        // . . Q .
        // Attacking pairs: (0,1)-(1,0), (0,1)-(2,3), (1,0)-(3,2), (2,3)-(3,2)
        assert_eq!(count_diagonal_conflicts(&[1, 0, 3, 2]), 8);

        // One pair only: (1,2)-(2,1)
        // Q . .
        // . . Q
        // . Q .
        assert_eq!(count_diagonal_conflicts(&[0, 2, 1]), 2);
    }

    #[test]
    fn test_main_diagonal() {
        // n queens on one diagonal: each sees the other n - 1
        for n in 1..8 {
            let genes: Vec<usize> = (0..n).collect();
            assert_eq!(count_diagonal_conflicts(&genes), n * (n - 1));
        }
    }

    #[test]
    fn test_anti_diagonal() {
        let genes: Vec<usize> = (0..6).rev().collect();
        assert_eq!(count_diagonal_conflicts(&genes), 30);
    }

    #[test]
    fn test_small_boards_always_conflict() {
        assert!(count_diagonal_conflicts(&[0, 1]) > 0);
        assert!(count_diagonal_conflicts(&[1, 0]) > 0);
        for perm in [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ] {
            assert!(
                count_diagonal_conflicts(&perm) > 0,
                "3x3 placement {perm:?} should conflict"
            );
        }
    }

    #[test]
    fn test_result_is_even_and_repeatable() {
        let genes = [3, 1, 4, 0, 5, 2, 7, 6];
        let first = count_diagonal_conflicts(&genes);
        assert_eq!(first % 2, 0, "pairs are counted from both ends");
        assert_eq!(count_diagonal_conflicts(&genes), first);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(count_diagonal_conflicts(&[]), 0);
        assert_eq!(count_diagonal_conflicts(&[0]), 0);
    }
}
