//! Press patterns and solved-board records

use crate::board::Board;
use crate::error::{LightsOutError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which cells to press, flattened row-major: `presses[row * size + col]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPressPattern")]
pub struct PressPattern {
    size: usize,
    presses: Vec<u8>,
}

/// Unchecked serde form of [`PressPattern`]
#[derive(Deserialize)]
struct RawPressPattern {
    size: usize,
    presses: Vec<u8>,
}

impl TryFrom<RawPressPattern> for PressPattern {
    type Error = LightsOutError;

    fn try_from(raw: RawPressPattern) -> Result<Self> {
        Self::from_flat(raw.size, raw.presses)
    }
}

impl PressPattern {
    /// A pattern that presses nothing
    pub fn zeros(size: usize) -> Result<Self> {
        Self::from_flat(size, vec![0; size * size])
    }

    /// Build a pattern from a flat 0/1 vector of length `size²`
    pub fn from_flat(size: usize, presses: Vec<u8>) -> Result<Self> {
        if size == 0 {
            return Err(LightsOutError::invalid_shape("pattern size must be at least 1"));
        }
        if presses.len() != size * size {
            return Err(LightsOutError::invalid_shape(format!(
                "pattern has {} entries, expected {} for a {}x{} board",
                presses.len(),
                size * size,
                size,
                size
            )));
        }
        if let Some(pos) = presses.iter().position(|&p| p > 1) {
            return Err(LightsOutError::invalid_shape(format!(
                "pattern entry {} is {}, only 0 and 1 are allowed",
                pos, presses[pos]
            )));
        }
        Ok(Self { size, presses })
    }

    /// Read a pattern stored in board format, '1' meaning press
    pub fn from_board(board: &Board) -> Self {
        Self {
            size: board.size(),
            presses: board.cells().iter().map(|&cell| u8::from(cell)).collect(),
        }
    }

    /// The pattern as a board with pressed cells lit
    pub fn to_board(&self) -> Result<Board> {
        Board::from_flat(self.size, self.presses.iter().map(|&p| p == 1).collect())
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_pressed(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.presses[row * self.size + col] == 1
    }

    /// Coordinates of the cells to press, row-major
    pub fn pressed_cells(&self) -> Vec<(usize, usize)> {
        self.presses
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p == 1)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    pub fn press_count(&self) -> usize {
        self.presses.iter().filter(|&&p| p == 1).count()
    }

    /// The flat press vector
    pub fn as_slice(&self) -> &[u8] {
        &self.presses
    }

    pub fn into_presses(self) -> Vec<u8> {
        self.presses
    }
}

/// A solved board together with what the elimination learned about it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub board: Board,
    pub pattern: PressPattern,
    /// Rank of the toggle system for this board size
    pub rank: usize,
    /// Variables with no pivot, all left unpressed
    pub free_variables: Vec<usize>,
    /// False when other press patterns also clear the board
    pub unique: bool,
    #[serde(skip)]
    pub solve_time: Duration,
    pub metadata: SolutionMetadata,
}

/// Metadata about a solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionMetadata {
    pub id: String,
    pub lit_cells: usize,
    pub press_count: usize,
    /// Fraction of cells pressed (0.0 to 1.0)
    pub press_density: f64,
}

impl Solution {
    pub fn new(
        board: Board,
        pattern: PressPattern,
        rank: usize,
        free_variables: Vec<usize>,
        solve_time: Duration,
    ) -> Self {
        let metadata = SolutionMetadata::analyze(&board, &pattern);
        let unique = free_variables.is_empty();

        Self {
            board,
            pattern,
            rank,
            free_variables,
            unique,
            solve_time,
            metadata,
        }
    }

    /// Number of free variables
    pub fn nullity(&self) -> usize {
        self.free_variables.len()
    }

    /// Number of press patterns that clear this board
    pub fn solution_count(&self) -> u128 {
        1u128.checked_shl(self.nullity() as u32).unwrap_or(u128::MAX)
    }

    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary {
            id: self.metadata.id.clone(),
            board_size: self.board.size(),
            lit_cells: self.metadata.lit_cells,
            press_count: self.metadata.press_count,
            unique: self.unique,
            solve_time_us: self.solve_time.as_micros() as u64,
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        use serde::de::Error as _;

        let solution: Self = serde_json::from_str(json)?;
        if solution.pattern.size() != solution.board.size() {
            return Err(serde_json::Error::custom(format!(
                "pattern is for a {}x{} board, board is {}x{}",
                solution.pattern.size(),
                solution.pattern.size(),
                solution.board.size(),
                solution.board.size()
            )));
        }
        Ok(solution)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

impl SolutionMetadata {
    pub fn analyze(board: &Board, pattern: &PressPattern) -> Self {
        let press_count = pattern.press_count();
        let cells = board.cell_count().max(1);

        Self {
            id: Self::generate_id(board),
            lit_cells: board.lit_count(),
            press_count,
            press_density: press_count as f64 / cells as f64,
        }
    }

    /// Identifier derived from the board, so equal boards share an id
    fn generate_id(board: &Board) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        board.hash(&mut hasher);

        format!("sol_{:x}", hasher.finish())
    }
}

/// Summary of a solution for display purposes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub id: String,
    pub board_size: usize,
    pub lit_cells: usize,
    pub press_count: usize,
    pub unique: bool,
    pub solve_time_us: u64,
}

impl std::fmt::Display for SolutionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solution {}: {}x{} board, {} lit, {} presses, {}, {}µs",
            self.id,
            self.board_size,
            self.board_size,
            self.lit_cells,
            self.press_count,
            if self.unique { "unique" } else { "one of several" },
            self.solve_time_us
        )
    }
}
