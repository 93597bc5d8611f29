//! File I/O operations for Lights Out boards

use super::Board;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

/// Load a board from a text file
/// Format: each line is a row, '1' for a lit cell and '0' for an unlit one
pub fn load_board_from_file<P: AsRef<Path>>(path: P) -> Result<Board> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read board file: {}", path.as_ref().display()))?;

    parse_board_from_string(&content)
        .with_context(|| format!("Failed to parse board from file: {}", path.as_ref().display()))
}

/// Parse a board from its text representation
pub fn parse_board_from_string(content: &str) -> Result<Board> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Board file is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row_idx, line) in lines.iter().enumerate() {
        let mut row: Vec<u8> = Vec::with_capacity(line.len());
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(0),
                '1' => row.push(1),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        rows.push(row);
    }

    Ok(Board::from_rows(&rows)?)
}

/// Save a board to a text file
pub fn save_board_to_file<P: AsRef<Path>>(board: &Board, path: P) -> Result<()> {
    let content = board_to_string(board);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write board to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a board to its text representation
pub fn board_to_string(board: &Board) -> String {
    let size = board.size();
    let mut result = String::with_capacity(size * (size + 1));

    for row in 0..size {
        for col in 0..size {
            result.push(if board.get(row, col) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Load every `.txt` board in a directory, sorted by file name.
/// Files that fail to parse are skipped with a warning.
pub fn load_boards_from_directory<P: AsRef<Path>>(dir_path: P) -> Result<Vec<(String, Board)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut boards = Vec::new();

    for entry in dir {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();

        if !path.is_file() || path.extension().map_or(true, |ext| ext != "txt") {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_board_from_file(&path) {
            Ok(board) => boards.push((name, board)),
            Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
        }
    }

    boards.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(boards)
}

/// Create example board files
pub fn create_example_boards<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        // Every light on, the classic starting position
        ("all_lit_5x5.txt", "11111\n11111\n11111\n11111\n11111\n"),
        // A plus sign, cleared by pressing the centre
        ("cross_3x3.txt", "010\n111\n010\n"),
        ("checker_4x4.txt", "1010\n0101\n1010\n0101\n"),
        // Has no solution: fails both 5x5 parity checks
        ("corner_5x5.txt", "10000\n00000\n00000\n00000\n00000\n"),
        ("single.txt", "1\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
