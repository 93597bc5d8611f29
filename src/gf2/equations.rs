//! Construction of the Lights Out equation system over GF(2)

use super::Gf2Matrix;
use crate::board::Board;
use tracing::debug;

/// Builds the augmented system `A·x = b` for a board.
///
/// Row `i` states that the presses of cell `i` and its in-bounds orthogonal
/// neighbours must XOR to the cell's current state.
pub struct EquationBuilder;

impl EquationBuilder {
    /// Build the `n² × (n² + 1)` augmented matrix for a square board
    pub fn build(board: &Board) -> Gf2Matrix {
        let cells = board.cell_count();
        let mut matrix = Gf2Matrix::zeros(cells, cells);

        for i in 0..cells {
            let (row, col) = board.coordinates(i);

            matrix.set(i, i, true);
            for neighbor in board.neighbors(row, col) {
                matrix.set(i, neighbor, true);
            }
            matrix.set_rhs(i, board.cells()[i]);
        }

        debug!(
            size = board.size(),
            equations = cells,
            lit = board.lit_count(),
            "built Lights Out equation system"
        );

        matrix
    }

    /// Statistics about the system a board produces
    pub fn statistics(board: &Board) -> EquationStatistics {
        let cells = board.cell_count();
        let coefficients = (0..cells)
            .map(|i| {
                let (row, col) = board.coordinates(i);
                1 + board.neighbors(row, col).len()
            })
            .sum();

        EquationStatistics {
            board_size: board.size(),
            equations: cells,
            variables: cells,
            nonzero_coefficients: coefficients,
            lit_cells: board.lit_count(),
        }
    }
}

/// Statistics about an equation system
#[derive(Debug, Clone)]
pub struct EquationStatistics {
    pub board_size: usize,
    pub equations: usize,
    pub variables: usize,
    pub nonzero_coefficients: usize,
    pub lit_cells: usize,
}

impl std::fmt::Display for EquationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Equation System Statistics:")?;
        writeln!(f, "  Board size: {}x{}", self.board_size, self.board_size)?;
        writeln!(f, "  Equations: {}", self.equations)?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Nonzero coefficients: {}", self.nonzero_coefficients)?;
        writeln!(f, "  Lit cells (nonzero RHS): {}", self.lit_cells)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_orthogonal_neighbor(n: usize, i: usize, j: usize) -> bool {
        let (ri, ci) = (i / n, i % n);
        let (rj, cj) = (j / n, j % n);
        ri.abs_diff(rj) + ci.abs_diff(cj) == 1
    }

    #[test]
    fn test_row_structure_matches_adjacency() {
        for n in 1..=6 {
            let board = Board::new(n).unwrap();
            let matrix = EquationBuilder::build(&board);
            let cells = n * n;

            assert_eq!(matrix.row_count(), cells);
            assert_eq!(matrix.var_count(), cells);

            for i in 0..cells {
                for j in 0..cells {
                    let expected = i == j || is_orthogonal_neighbor(n, i, j);
                    assert_eq!(matrix.get(i, j), expected, "n={} row={} col={}", n, i, j);
                }
            }
        }
    }

    #[test]
    fn test_rhs_copies_board() {
        let board = Board::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap();
        let matrix = EquationBuilder::build(&board);

        let rhs: Vec<bool> = (0..4).map(|i| matrix.rhs(i)).collect();
        assert_eq!(rhs, vec![true, false, false, true]);
    }

    #[test]
    fn test_single_cell_board() {
        let board = Board::from_rows(&[vec![1]]).unwrap();
        let matrix = EquationBuilder::build(&board);

        assert_eq!(matrix.row_count(), 1);
        assert!(matrix.get(0, 0));
        assert!(matrix.rhs(0));
    }

    #[test]
    fn test_statistics() {
        let stats = EquationBuilder::statistics(&Board::all_lit(3).unwrap());
        assert_eq!(stats.equations, 9);
        // 4 corners * 3 + 4 edges * 4 + centre * 5
        assert_eq!(stats.nonzero_coefficients, 33);
        assert_eq!(stats.lit_cells, 9);
    }
}
