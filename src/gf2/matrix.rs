//! Augmented GF(2) matrix with bitset rows

use fixedbitset::FixedBitSet;
use std::fmt;

/// An augmented matrix over GF(2).
///
/// Each row is a fixed-width bitset of `vars + 1` bits: the first `vars` bits
/// are coefficients and the last bit is the right-hand side. Row addition is
/// XOR, so a row operation costs a handful of word operations.
#[derive(Clone, PartialEq, Eq)]
pub struct Gf2Matrix {
    rows: Vec<FixedBitSet>,
    vars: usize,
}

impl Gf2Matrix {
    /// Create an all-zero matrix with `rows` equations over `vars` variables
    pub fn zeros(rows: usize, vars: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| FixedBitSet::with_capacity(vars + 1)).collect(),
            vars,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of variable (coefficient) columns
    pub fn var_count(&self) -> usize {
        self.vars
    }

    /// Column index of the right-hand side
    #[inline]
    pub fn rhs_column(&self) -> usize {
        self.vars
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows[row][col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        self.rows[row].set(col, value);
    }

    #[inline]
    pub fn rhs(&self, row: usize) -> bool {
        self.rows[row][self.vars]
    }

    pub fn set_rhs(&mut self, row: usize, value: bool) {
        let col = self.vars;
        self.rows[row].set(col, value);
    }

    pub fn row(&self, row: usize) -> &FixedBitSet {
        &self.rows[row]
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [FixedBitSet] {
        &mut self.rows
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// `rows[dst] ^= rows[src]`
    pub fn xor_row_into(&mut self, src: usize, dst: usize) {
        assert_ne!(src, dst, "cannot XOR a row into itself");
        if src < dst {
            let (head, tail) = self.rows.split_at_mut(dst);
            tail[0].symmetric_difference_with(&head[src]);
        } else {
            let (head, tail) = self.rows.split_at_mut(src);
            head[dst].symmetric_difference_with(&tail[0]);
        }
    }

    /// Coefficient columns set in a row, ascending; the RHS bit is excluded
    pub fn row_coefficients(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        let vars = self.vars;
        self.rows[row].ones().take_while(move |&col| col < vars)
    }

    /// First coefficient column holding a 1, if any
    pub fn leading_column(&self, row: usize) -> Option<usize> {
        self.row_coefficients(row).next()
    }

    /// Number of 1s among a row's coefficients
    pub fn row_weight(&self, row: usize) -> usize {
        self.rows[row].count_ones(..self.vars)
    }
}

impl fmt::Debug for Gf2Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gf2Matrix {}x({}+1)", self.rows.len(), self.vars)?;
        for row in &self.rows {
            for col in 0..self.vars {
                write!(f, "{}", u8::from(row[col]))?;
            }
            writeln!(f, " | {}", u8::from(row[self.vars]))?;
        }
        Ok(())
    }
}
