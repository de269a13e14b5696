//! Textual board rendering and placement checks.

use std::fmt;

/// A queen placement viewed as a board: `columns[row]` is the column of
/// that row's queen.
///
/// ```
/// use queens_ga::board::Board;
///
/// let board = Board::new(&[1, 3, 0, 2]);
/// assert_eq!(board.to_string(), ". Q . .\n. . . Q\nQ . . .\n. . Q .\n");
/// assert!(board.is_valid_solution());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board<'a> {
    columns: &'a [usize],
}

impl<'a> Board<'a> {
    pub fn new(columns: &'a [usize]) -> Self {
        Self { columns }
    }

    /// Board width.
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    /// Checks the placement from first principles: every row and column
    /// holds exactly one queen and no two queens share a diagonal.
    ///
    /// Independent of the engine's conflict counter.
    pub fn is_valid_solution(&self) -> bool {
        let n = self.columns.len();
        let mut cols = vec![false; n];
        let mut diag = vec![false; 2 * n];
        let mut anti = vec![false; 2 * n];

        for (row, &col) in self.columns.iter().enumerate() {
            if col >= n {
                return false;
            }
            let d = row + n - col;
            let a = row + col;
            if cols[col] || diag[d] || anti[a] {
                return false;
            }
            cols[col] = true;
            diag[d] = true;
            anti[a] = true;
        }
        true
    }
}

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.columns.len();
        for &queen in self.columns {
            for col in 0..n {
                if col > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(if col == queen { "Q" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// Renders a placement as rows of `Q` and `.` cells.
pub fn render(columns: &[usize]) -> String {
    Board::new(columns).to_string()
}
