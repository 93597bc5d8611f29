//! A configured Lights Out problem: settings plus the board to clear

use super::{LightsOutSolver, Solution, SolutionValidator, SystemAnalysis};
use crate::board::{load_board_from_file, Board};
use crate::config::Settings;
use crate::gf2::{EquationBuilder, EquationStatistics};
use anyhow::{Context, Result};
use tracing::{info, warn};

pub struct LightsOutProblem {
    board: Board,
    solver: LightsOutSolver,
    validator: SolutionValidator,
}

impl LightsOutProblem {
    /// Create a problem from settings, loading the configured board file
    pub fn new(settings: &Settings) -> Result<Self> {
        let board = load_board_from_file(&settings.input.board_file)
            .context("Failed to load board file")?;

        Ok(Self::with_board(settings, board))
    }

    /// Create a problem with an explicit board
    pub fn with_board(settings: &Settings, board: Board) -> Self {
        Self {
            board,
            solver: settings.build_solver(),
            validator: SolutionValidator::new(),
        }
    }

    /// Solve the board and double-check the pattern by simulation
    pub fn solve(&self) -> Result<Solution> {
        info!(
            size = self.board.size(),
            lit = self.board.lit_count(),
            "solving Lights Out board"
        );

        let solution = self
            .solver
            .solve_detailed(&self.board)
            .context("Board has no solution")?;

        let validation = self.validator.validate(&self.board, &solution.pattern)?;
        if !validation.is_valid {
            anyhow::bail!(
                "Computed pattern failed validation: {}",
                validation.error_message.unwrap_or_else(|| "unknown error".to_string())
            );
        }

        if !solution.unique {
            warn!(
                free_variables = solution.nullity(),
                "board has several solutions, free cells left unpressed"
            );
        }

        Ok(solution)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn analyze(&self) -> SystemAnalysis {
        self.solver.analyze(&self.board)
    }

    pub fn equation_statistics(&self) -> EquationStatistics {
        EquationBuilder::statistics(&self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::save_board_to_file;
    use tempfile::tempdir;

    #[test]
    fn test_problem_from_settings() {
        let temp_dir = tempdir().unwrap();
        let board_path = temp_dir.path().join("board.txt");
        save_board_to_file(&Board::all_lit(4).unwrap(), &board_path).unwrap();

        let mut settings = Settings::default();
        settings.input.board_file = board_path;

        let problem = LightsOutProblem::new(&settings).unwrap();
        assert_eq!(problem.board().size(), 4);

        let solution = problem.solve().unwrap();
        assert_eq!(solution.pattern.as_slice().len(), 16);
        assert!(!solution.unique);
    }

    #[test]
    fn test_missing_board_file() {
        let mut settings = Settings::default();
        settings.input.board_file = "definitely/not/here.txt".into();
        assert!(LightsOutProblem::new(&settings).is_err());
    }

    #[test]
    fn test_unsolvable_problem() {
        let board = Board::from_rows(&[
            vec![1, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap();
        let problem = LightsOutProblem::with_board(&Settings::default(), board);

        let err = problem.solve().unwrap_err();
        assert!(format!("{:#}", err).contains("Inconsistent system"));
        assert!(!problem.analyze().is_solvable());
        assert_eq!(problem.equation_statistics().equations, 25);
    }

    #[test]
    fn test_configured_size_limit() {
        let mut settings = Settings::default();
        settings.solver.max_board_size = 3;
        let problem = LightsOutProblem::with_board(&settings, Board::all_lit(4).unwrap());

        let err = problem.solve().unwrap_err();
        assert!(format!("{:#}", err).contains("largest accepted size is 3x3"));
    }
}
