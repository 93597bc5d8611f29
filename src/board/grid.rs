//! Square board representation for Lights Out

use crate::error::{LightsOutError, Result};
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An n×n Lights Out board, stored row-major.
///
/// Always non-empty and square: every constructor, serde included, goes
/// through the same shape checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Board {
    size: usize,
    cells: Vec<bool>,
}

impl Board {
    /// Create a new board with every light off
    pub fn new(size: usize) -> Result<Self> {
        Self::from_flat(size, vec![false; size * size])
    }

    /// Create a board with every light on
    pub fn all_lit(size: usize) -> Result<Self> {
        Self::from_flat(size, vec![true; size * size])
    }

    /// Create a board with each light on with probability one half
    pub fn random(size: usize) -> Result<Self> {
        Self::random_with_rng(size, &mut rand::thread_rng())
    }

    pub fn random_with_rng<R: Rng>(size: usize, rng: &mut R) -> Result<Self> {
        let cells = (0..size * size).map(|_| rng.gen_bool(0.5)).collect();
        Self::from_flat(size, cells)
    }

    /// Create a board from row-major cells; `cells.len()` must be `size²`
    pub fn from_flat(size: usize, cells: Vec<bool>) -> Result<Self> {
        if size == 0 {
            return Err(LightsOutError::invalid_shape("board size must be at least 1"));
        }
        if cells.len() != size * size {
            return Err(LightsOutError::invalid_shape(format!(
                "{} cells given for a {}x{} board",
                cells.len(),
                size,
                size
            )));
        }
        Ok(Self { size, cells })
    }

    /// Create a board from rows of 0/1 values, rejecting empty, ragged,
    /// non-square and non-binary input
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(LightsOutError::invalid_shape("board has no rows"));
        }

        let size = rows.len();
        match rows.iter().map(Vec::len).all_equal_value() {
            Ok(width) if width == size => {}
            Ok(width) => {
                return Err(LightsOutError::invalid_shape(format!(
                    "board is {}x{}, expected a square board",
                    size, width
                )));
            }
            Err(Some((first, other))) => {
                return Err(LightsOutError::invalid_shape(format!(
                    "ragged rows: found lengths {} and {}",
                    first, other
                )));
            }
            Err(None) => unreachable!("rows checked non-empty"),
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, &value) in row.iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    other => {
                        return Err(LightsOutError::invalid_shape(format!(
                            "cell ({}, {}) has value {}, only 0 and 1 are allowed",
                            row_idx, col_idx, other
                        )));
                    }
                }
            }
        }

        Ok(Self { size, cells })
    }

    /// Side length n
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major cell states
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Convert 2D coordinates to the flat cell (and variable) index
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Convert a flat index back to (row, col)
    #[inline]
    pub fn coordinates(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        if row < self.size && col < self.size {
            self.cells[self.index(row, col)]
        } else {
            false
        }
    }

    pub fn set(&mut self, row: usize, col: usize, value: bool) -> Result<()> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Flip a single light
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<()> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx] = !self.cells[idx];
        Ok(())
    }

    /// Flip the light at a flat index
    pub(crate) fn toggle_index(&mut self, index: usize) {
        self.cells[index] = !self.cells[index];
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.size || col >= self.size {
            return Err(LightsOutError::invalid_shape(format!(
                "coordinates ({}, {}) out of bounds for {}x{} board",
                row, col, self.size, self.size
            )));
        }
        Ok(())
    }

    /// Flat indices of the in-bounds up/down/left/right neighbours of a cell
    pub fn neighbors(&self, row: usize, col: usize) -> Vec<usize> {
        let mut neighbors = Vec::with_capacity(4);
        if row > 0 {
            neighbors.push(self.index(row - 1, col));
        }
        if row + 1 < self.size {
            neighbors.push(self.index(row + 1, col));
        }
        if col > 0 {
            neighbors.push(self.index(row, col - 1));
        }
        if col + 1 < self.size {
            neighbors.push(self.index(row, col + 1));
        }
        neighbors
    }

    /// Coordinates of every lit cell
    pub fn lit_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &lit)| lit)
            .map(|(idx, _)| self.coordinates(idx))
            .collect()
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// True when every light is off
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Rows as 0/1 values, the shape accepted by [`Board::from_rows`]
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&cell| u8::from(cell)).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = LightsOutError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<Board> for Vec<Vec<u8>> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = if self.get(row, col) { "🟨" } else { "⬛" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.cells().len(), 9);
        assert!(board.is_cleared());

        let lit = Board::all_lit(4).unwrap();
        assert_eq!(lit.lit_count(), 16);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Board::new(0),
            Err(LightsOutError::InvalidBoardShape { .. })
        ));
        assert!(Board::all_lit(0).is_err());
        assert!(Board::random(0).is_err());
        assert!(Board::from_flat(0, vec![]).is_err());
        assert!(Board::from_flat(2, vec![true; 3]).is_err());
    }

    #[test]
    fn test_random_board() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::random_with_rng(6, &mut rng).unwrap();
        assert_eq!(board.size(), 6);
        assert_eq!(board.cells().len(), 36);

        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(Board::random_with_rng(6, &mut rng).unwrap(), board);
    }

    #[test]
    fn test_serde_uses_rows_and_checks_shape() {
        let board = Board::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[[1,0],[0,1]]");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);

        assert!(serde_json::from_str::<Board>("[]").is_err());
        assert!(serde_json::from_str::<Board>("[[1,0],[1]]").is_err());
        assert!(serde_json::from_str::<Board>("[[1,0,1],[0,1,0],[1,0,1],[0,0,0]]").is_err());
        assert!(serde_json::from_str::<Board>(r#"{"size":3,"cells":[true]}"#).is_err());
    }

    #[test]
    fn test_board_from_rows() {
        let rows = vec![vec![1, 0, 1], vec![0, 1, 0], vec![1, 0, 1]];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.lit_count(), 5);
        assert!(board.get(1, 1));
        assert_eq!(board.to_rows(), rows);
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(
            Board::from_rows(&[]),
            Err(LightsOutError::InvalidBoardShape { .. })
        ));
        assert!(matches!(
            Board::from_rows(&[vec![0, 1], vec![1]]),
            Err(LightsOutError::InvalidBoardShape { .. })
        ));
        assert!(matches!(
            Board::from_rows(&[vec![0, 1, 0], vec![1, 0, 1]]),
            Err(LightsOutError::InvalidBoardShape { .. })
        ));
        assert!(matches!(
            Board::from_rows(&[vec![0, 2], vec![1, 0]]),
            Err(LightsOutError::InvalidBoardShape { .. })
        ));
        assert!(matches!(
            Board::from_rows(&[vec![]]),
            Err(LightsOutError::InvalidBoardShape { .. })
        ));
    }

    #[test]
    fn test_neighbors() {
        let board = Board::new(3).unwrap();

        // Corner has two neighbours, edge three, centre four
        assert_eq!(board.neighbors(0, 0), vec![3, 1]);
        assert_eq!(board.neighbors(0, 1).len(), 3);
        assert_eq!(board.neighbors(1, 1), vec![1, 7, 3, 5]);

        let single = Board::new(1).unwrap();
        assert!(single.neighbors(0, 0).is_empty());
    }

    #[test]
    fn test_toggle_and_bounds() {
        let mut board = Board::new(2).unwrap();
        board.toggle(1, 0).unwrap();
        assert!(board.get(1, 0));
        assert_eq!(board.lit_cells(), vec![(1, 0)]);
        assert!(board.toggle(2, 0).is_err());
        assert!(board.set(0, 5, true).is_err());
    }
}
