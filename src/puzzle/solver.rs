//! Lights Out solver: build, eliminate, back-substitute

use super::{PressPattern, Solution};
use crate::board::Board;
use crate::error::{LightsOutError, Result};
use crate::gf2::{BackSubstitutor, EquationBuilder, Gf2Eliminator, ReducedSystem};
use std::time::Instant;
use tracing::{debug, info};

/// Largest side length solved by default; elimination work grows with n⁶
pub const DEFAULT_MAX_BOARD_SIZE: usize = 64;

/// Solves boards by Gauss-Jordan elimination over GF(2).
///
/// Deterministic: the same board always yields the same pattern, with every
/// free variable left unpressed.
#[derive(Debug, Clone)]
pub struct LightsOutSolver {
    eliminator: Gf2Eliminator,
    max_board_size: Option<usize>,
}

impl Default for LightsOutSolver {
    fn default() -> Self {
        Self::new(Gf2Eliminator::default())
    }
}

impl LightsOutSolver {
    pub fn new(eliminator: Gf2Eliminator) -> Self {
        Self {
            eliminator,
            max_board_size: Some(DEFAULT_MAX_BOARD_SIZE),
        }
    }

    /// Refuse boards wider than `max`; `None` lifts the limit
    pub fn with_max_board_size(mut self, max: Option<usize>) -> Self {
        self.max_board_size = max;
        self
    }

    pub fn max_board_size(&self) -> Option<usize> {
        self.max_board_size
    }

    /// Solver whose elimination sweeps go parallel from `threshold` rows
    pub fn with_parallel_threshold(threshold: usize) -> Self {
        Self::new(Gf2Eliminator::new(threshold))
    }

    pub fn eliminator(&self) -> &Gf2Eliminator {
        &self.eliminator
    }

    /// Find a press pattern that turns every light off
    pub fn solve(&self, board: &Board) -> Result<PressPattern> {
        self.check_size(board)?;
        let reduced = self.reduce(board);
        let assignment = BackSubstitutor::substitute(&reduced)?;
        PressPattern::from_flat(board.size(), assignment.to_bits())
    }

    /// Validate raw 0/1 rows into a square board, then solve it
    pub fn solve_rows(&self, rows: &[Vec<u8>]) -> Result<PressPattern> {
        let board = Board::from_rows(rows)?;
        self.solve(&board)
    }

    /// Solve and report rank, free variables and timing alongside the pattern
    pub fn solve_detailed(&self, board: &Board) -> Result<Solution> {
        self.check_size(board)?;
        let start_time = Instant::now();

        let reduced = self.reduce(board);
        let assignment = BackSubstitutor::substitute(&reduced)?;
        let pattern = PressPattern::from_flat(board.size(), assignment.to_bits())?;

        let solution = Solution::new(
            board.clone(),
            pattern,
            reduced.rank(),
            assignment.free_variables,
            start_time.elapsed(),
        );

        info!(
            size = board.size(),
            presses = solution.metadata.press_count,
            unique = solution.unique,
            "solved Lights Out board"
        );

        Ok(solution)
    }

    /// Inspect the system for a board without failing on inconsistency.
    /// The size limit does not apply here.
    pub fn analyze(&self, board: &Board) -> SystemAnalysis {
        let reduced = self.reduce(board);
        let inconsistent_row = match BackSubstitutor::substitute(&reduced) {
            Ok(_) => None,
            Err(LightsOutError::InconsistentSystem { row }) => Some(row),
            Err(LightsOutError::InvalidBoardShape { .. }) => None,
        };

        SystemAnalysis {
            board_size: board.size(),
            variables: reduced.matrix.var_count(),
            rank: reduced.rank(),
            free_variables: reduced.free_columns.clone(),
            inconsistent_row,
        }
    }

    fn check_size(&self, board: &Board) -> Result<()> {
        match self.max_board_size {
            Some(max) if board.size() > max => Err(LightsOutError::invalid_shape(format!(
                "board is {}x{}, the largest accepted size is {}x{}",
                board.size(),
                board.size(),
                max,
                max
            ))),
            _ => Ok(()),
        }
    }

    fn reduce(&self, board: &Board) -> ReducedSystem {
        let matrix = EquationBuilder::build(board);
        let reduced = self.eliminator.reduce(matrix);
        debug!(rank = reduced.rank(), nullity = reduced.nullity(), "system reduced");
        reduced
    }
}

/// What elimination reveals about a board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemAnalysis {
    pub board_size: usize,
    pub variables: usize,
    pub rank: usize,
    pub free_variables: Vec<usize>,
    /// Reduced row that reads `0 = 1`, when the board cannot be cleared
    pub inconsistent_row: Option<usize>,
}

impl SystemAnalysis {
    pub fn nullity(&self) -> usize {
        self.free_variables.len()
    }

    pub fn is_solvable(&self) -> bool {
        self.inconsistent_row.is_none()
    }

    pub fn is_unique(&self) -> bool {
        self.is_solvable() && self.free_variables.is_empty()
    }
}

impl std::fmt::Display for SystemAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "System Analysis:")?;
        writeln!(f, "  Board size: {}x{}", self.board_size, self.board_size)?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Rank: {}", self.rank)?;
        writeln!(f, "  Free variables: {}", self.nullity())?;
        match self.inconsistent_row {
            Some(row) => writeln!(f, "  Solvable: no (row {} reduces to 0 = 1)", row)?,
            None if self.nullity() == 0 => writeln!(f, "  Solvable: yes (unique solution)")?,
            None => writeln!(
                f,
                "  Solvable: yes ({} solutions, free variables fixed to 0)",
                1u128.checked_shl(self.nullity() as u32).unwrap_or(u128::MAX)
            )?,
        }
        Ok(())
    }
}
