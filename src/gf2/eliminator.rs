//! Gauss-Jordan elimination over GF(2)

use super::Gf2Matrix;
use fixedbitset::FixedBitSet;
use rayon::prelude::*;
use tracing::debug;

/// Row count from which the per-pivot XOR sweep runs on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1024;

/// A pivot chosen during elimination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    pub row: usize,
    pub column: usize,
}

/// A matrix in fully reduced row-echelon form together with its pivots
#[derive(Debug, Clone)]
pub struct ReducedSystem {
    pub matrix: Gf2Matrix,
    pub pivots: Vec<Pivot>,
    pub free_columns: Vec<usize>,
}

impl ReducedSystem {
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Number of free variables
    pub fn nullity(&self) -> usize {
        self.free_columns.len()
    }

    /// Every pivot column is zero outside its pivot row, and rows past the
    /// rank have no coefficients left.
    pub fn is_fully_reduced(&self) -> bool {
        let m = &self.matrix;
        let pivots_isolated = self.pivots.iter().all(|pivot| {
            (0..m.row_count()).all(|r| m.get(r, pivot.column) == (r == pivot.row))
        });
        let tail_empty = (self.rank()..m.row_count()).all(|r| m.row_weight(r) == 0);
        pivots_isolated && tail_empty
    }
}

/// Reduces an augmented GF(2) matrix with whole-row XOR operations
#[derive(Debug, Clone)]
pub struct Gf2Eliminator {
    parallel_threshold: usize,
}

impl Default for Gf2Eliminator {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_THRESHOLD)
    }
}

impl Gf2Eliminator {
    /// `parallel_threshold` of 0 keeps every sweep sequential
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Reduce the matrix to fully reduced row-echelon form.
    ///
    /// Columns are processed left to right. The pivot for a column is the
    /// first row at or below the current pivot row with a 1 there; it is
    /// swapped up and XORed into every other row holding a 1 in that column.
    /// Columns without a candidate are free. Inconsistency is not detected
    /// here.
    pub fn reduce(&self, mut matrix: Gf2Matrix) -> ReducedSystem {
        let rows = matrix.row_count();
        let vars = matrix.var_count();
        let mut pivots = Vec::with_capacity(rows.min(vars));
        let mut free_columns = Vec::new();
        let mut pivot_row = 0;

        for col in 0..vars {
            if pivot_row >= rows {
                free_columns.extend(col..vars);
                break;
            }

            let Some(found) = (pivot_row..rows).find(|&r| matrix.get(r, col)) else {
                free_columns.push(col);
                continue;
            };

            if found != pivot_row {
                matrix.swap_rows(found, pivot_row);
            }
            self.eliminate_column(&mut matrix, pivot_row, col);

            pivots.push(Pivot {
                row: pivot_row,
                column: col,
            });
            pivot_row += 1;
        }

        let reduced = ReducedSystem {
            matrix,
            pivots,
            free_columns,
        };
        debug_assert!(reduced.is_fully_reduced());

        debug!(
            rows,
            vars,
            rank = reduced.rank(),
            free = reduced.nullity(),
            "GF(2) elimination finished"
        );

        reduced
    }

    /// XOR the pivot row into every other row with a 1 in `col`
    fn eliminate_column(&self, matrix: &mut Gf2Matrix, pivot_row: usize, col: usize) {
        let pivot = matrix.row(pivot_row).clone();
        let rows = matrix.rows_mut();

        let sweep = |(r, row): (usize, &mut FixedBitSet)| {
            if r != pivot_row && row[col] {
                row.symmetric_difference_with(&pivot);
            }
        };

        if self.parallel_threshold > 0 && rows.len() >= self.parallel_threshold {
            rows.par_iter_mut().enumerate().for_each(sweep);
        } else {
            rows.iter_mut().enumerate().for_each(sweep);
        }
    }
}
