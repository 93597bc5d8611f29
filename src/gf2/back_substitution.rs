//! Back-substitution on a fully reduced GF(2) system

use super::ReducedSystem;
use crate::error::{LightsOutError, Result};
use fixedbitset::FixedBitSet;

/// A concrete assignment for every variable of a reduced system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub values: FixedBitSet,
    /// Variables left at their default of 0
    pub free_variables: Vec<usize>,
}

impl Assignment {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.len() == 0
    }

    /// True when the system pinned down every variable
    pub fn is_unique(&self) -> bool {
        self.free_variables.is_empty()
    }

    pub fn to_bits(&self) -> Vec<u8> {
        (0..self.values.len())
            .map(|i| u8::from(self.values[i]))
            .collect()
    }
}

/// Reads a press vector out of a reduced system
pub struct BackSubstitutor;

impl BackSubstitutor {
    /// Assign every pivot variable from the bottom row up.
    ///
    /// The solution starts all-zero, so variables that never received a
    /// pivot stay 0. A row with no coefficients but a right-hand side of 1
    /// makes the system inconsistent.
    pub fn substitute(system: &ReducedSystem) -> Result<Assignment> {
        let matrix = &system.matrix;
        let vars = matrix.var_count();
        let mut solution = FixedBitSet::with_capacity(vars);

        for row in (0..matrix.row_count()).rev() {
            let mut coefficients = matrix.row_coefficients(row);

            let Some(pivot_col) = coefficients.next() else {
                if matrix.rhs(row) {
                    return Err(LightsOutError::InconsistentSystem { row });
                }
                continue;
            };

            let value = coefficients.fold(matrix.rhs(row), |acc, col| acc ^ solution[col]);
            solution.set(pivot_col, value);
        }

        Ok(Assignment {
            values: solution,
            free_variables: system.free_columns.clone(),
        })
    }
}
