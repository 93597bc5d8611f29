//! Lights Out press rules

use super::Board;
use crate::error::{LightsOutError, Result};
use crate::puzzle::PressPattern;

/// Forward simulation of presses on a board
pub struct LightsOutRules;

impl LightsOutRules {
    /// Press a cell: toggle it and each in-bounds orthogonal neighbour
    pub fn press(board: &mut Board, row: usize, col: usize) -> Result<()> {
        board.toggle(row, col)?;
        for neighbor in board.neighbors(row, col) {
            board.toggle_index(neighbor);
        }
        Ok(())
    }

    /// Flat indices toggled by pressing a cell, the cell itself first
    pub fn press_effect(board: &Board, row: usize, col: usize) -> Vec<usize> {
        let mut affected = vec![board.index(row, col)];
        affected.extend(board.neighbors(row, col));
        affected
    }

    /// Press every cell marked in the pattern and return the resulting board.
    /// Presses commute, so the order is irrelevant.
    pub fn apply_pattern(board: &Board, pattern: &PressPattern) -> Result<Board> {
        if pattern.size() != board.size() {
            return Err(LightsOutError::invalid_shape(format!(
                "pattern is for a {}x{} board, board is {}x{}",
                pattern.size(),
                pattern.size(),
                board.size(),
                board.size()
            )));
        }

        let mut result = board.clone();
        for (row, col) in pattern.pressed_cells() {
            Self::press(&mut result, row, col)?;
        }
        Ok(result)
    }

    /// Check whether the pattern turns every light off
    pub fn clears(board: &Board, pattern: &PressPattern) -> bool {
        Self::apply_pattern(board, pattern)
            .map(|result| result.is_cleared())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_centre() {
        let mut board = Board::new(3).unwrap();
        LightsOutRules::press(&mut board, 1, 1).unwrap();

        let expected = Board::from_rows(&[vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]).unwrap();
        assert_eq!(board, expected);
    }

    #[test]
    fn test_press_corner_and_undo() {
        let mut board = Board::new(3).unwrap();
        LightsOutRules::press(&mut board, 0, 0).unwrap();
        assert_eq!(board.lit_cells(), vec![(0, 0), (0, 1), (1, 0)]);

        // Pressing twice cancels out
        LightsOutRules::press(&mut board, 0, 0).unwrap();
        assert!(board.is_cleared());
    }

    #[test]
    fn test_press_effect() {
        let board = Board::new(2).unwrap();
        assert_eq!(LightsOutRules::press_effect(&board, 0, 0), vec![0, 2, 1]);
    }

    #[test]
    fn test_apply_pattern() {
        let board = Board::from_rows(&[vec![1, 1], vec![1, 0]]).unwrap();
        let pattern = PressPattern::from_flat(2, vec![1, 0, 0, 0]).unwrap();

        assert!(LightsOutRules::clears(&board, &pattern));

        let wrong_size = PressPattern::zeros(3).unwrap();
        assert!(LightsOutRules::apply_pattern(&board, &wrong_size).is_err());
        assert!(!LightsOutRules::clears(&board, &wrong_size));
    }
}
