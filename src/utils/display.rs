//! Display and output formatting utilities

use crate::board::{Board, LightsOutRules};
use crate::config::OutputFormat;
use crate::puzzle::{PressPattern, Solution};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::{Path, PathBuf};

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a solution for console output
    pub fn format_solution(solution: &Solution, show_steps: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.metadata.id));
        output.push_str(&format!("Board: {}x{}\n", solution.board.size(), solution.board.size()));
        output.push_str(&format!("Lit cells: {}\n", solution.metadata.lit_cells));
        output.push_str(&format!(
            "Presses: {} ({:.1}% of cells)\n",
            solution.metadata.press_count,
            solution.metadata.press_density * 100.0
        ));
        output.push_str(&format!("Rank: {}\n", solution.rank));
        if solution.unique {
            output.push_str("Uniqueness: unique\n");
        } else {
            output.push_str(&format!(
                "Uniqueness: {} free variable(s), free cells left unpressed\n",
                solution.nullity()
            ));
        }
        output.push_str(&format!("Solve time: {:.3}ms\n", solution.solve_time.as_secs_f64() * 1000.0));
        output.push('\n');

        output.push_str("Board (x = press):\n");
        output.push_str(&Self::format_overlay(&solution.board, &solution.pattern));
        output.push('\n');
        output.push_str(&format!("Pattern: [{}]\n", Self::format_flat(&solution.pattern)));

        if show_steps {
            output.push('\n');
            output.push_str(&Self::format_steps(&solution.board, &solution.pattern));
        }

        output
    }

    /// Flat press vector as comma-separated bits
    pub fn format_flat(pattern: &PressPattern) -> String {
        pattern.as_slice().iter().join(", ")
    }

    /// Format a board in compact form
    pub fn format_board_compact(board: &Board) -> String {
        let mut output = String::new();
        for row in 0..board.size() {
            for col in 0..board.size() {
                output.push(if board.get(row, col) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Board with the cells to press marked: `X` lit and pressed, `x` unlit
    /// and pressed
    pub fn format_overlay(board: &Board, pattern: &PressPattern) -> String {
        let mut output = String::new();
        for row in 0..board.size() {
            for col in 0..board.size() {
                let symbol = match (board.get(row, col), pattern.is_pressed(row, col)) {
                    (true, true) => 'X',
                    (false, true) => 'x',
                    (true, false) => '█',
                    (false, false) => '·',
                };
                output.push(symbol);
            }
            output.push('\n');
        }
        output
    }

    /// Format a board with coordinates
    pub fn format_board_with_coords(board: &Board) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..board.size() {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..board.size() {
            output.push_str(&format!("{:2} ", row));
            for col in 0..board.size() {
                output.push_str(if board.get(row, col) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Board after each press of the pattern, in row-major order
    pub fn format_steps(board: &Board, pattern: &PressPattern) -> String {
        let mut output = String::new();
        let mut current = board.clone();

        output.push_str("Start:\n");
        output.push_str(&Self::format_board_compact(&current));

        for (step, (row, col)) in pattern.pressed_cells().into_iter().enumerate() {
            // Coordinates come from the pattern, which may not match the board
            if LightsOutRules::press(&mut current, row, col).is_err() {
                break;
            }
            let toggled = LightsOutRules::press_effect(&current, row, col).len();
            output.push_str(&format!(
                "\nStep {}: press ({}, {}), {} toggled, {} lit\n",
                step + 1,
                row,
                col,
                toggled,
                current.lit_count()
            ));
            output.push_str(&Self::format_board_compact(&current));
        }

        output
    }

    /// Save a solution in the configured format, returning the written path
    pub fn save_solution<P: AsRef<Path>>(
        solution: &Solution,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.txt", solution.metadata.id));
                std::fs::write(&path, Self::format_solution(solution, true))?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.json", solution.metadata.id));
                solution.save_to_file(&path)?;
                path
            }
            OutputFormat::Visual => {
                let path = output_dir.join(format!("{}_visual.txt", solution.metadata.id));
                std::fs::write(&path, Self::create_visual(solution))?;
                path
            }
        };

        Ok(path)
    }

    fn create_visual(solution: &Solution) -> String {
        let mut output = String::new();

        output.push_str(&format!("Visual Solution - {}\n", solution.metadata.id));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str(&format!("\nBoard (Lit: {}):\n", solution.board.lit_count()));
        output.push_str(&Self::format_board_with_coords(&solution.board));

        output.push_str(&format!("\nPresses ({}):\n", solution.metadata.press_count));
        if let Ok(presses) = solution.pattern.to_board() {
            output.push_str(&Self::format_board_with_coords(&presses));
        }

        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::LightsOutSolver;

    fn cross_solution() -> Solution {
        let board = Board::from_rows(&[vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]).unwrap();
        LightsOutSolver::default().solve_detailed(&board).unwrap()
    }

    #[test]
    fn test_board_formatting() {
        let board = Board::from_rows(&[vec![1, 0], vec![0, 1]]).unwrap();

        assert_eq!(SolutionFormatter::format_board_compact(&board), "█·\n·█\n");

        let with_coords = SolutionFormatter::format_board_with_coords(&board);
        assert!(with_coords.starts_with("    0 1\n"));
    }

    #[test]
    fn test_overlay_and_flat() {
        let solution = cross_solution();
        assert_eq!(
            SolutionFormatter::format_overlay(&solution.board, &solution.pattern),
            "·█·\n█X█\n·█·\n"
        );
        assert_eq!(
            SolutionFormatter::format_flat(&solution.pattern),
            "0, 0, 0, 0, 1, 0, 0, 0, 0"
        );
    }

    #[test]
    fn test_steps_end_cleared() {
        let solution = cross_solution();
        let steps = SolutionFormatter::format_steps(&solution.board, &solution.pattern);
        assert!(steps.contains("Step 1: press (1, 1), 5 toggled, 0 lit"));
        assert!(steps.ends_with("···\n···\n···\n"));
    }

    #[test]
    fn test_save_solution_formats() {
        let temp_dir = tempfile::tempdir().unwrap();
        let solution = cross_solution();

        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Visual] {
            let path = SolutionFormatter::save_solution(&solution, temp_dir.path(), format).unwrap();
            assert!(path.exists());
        }

        let json_path = temp_dir.path().join(format!("{}.json", solution.metadata.id));
        let loaded = Solution::load_from_file(json_path).unwrap();
        assert_eq!(loaded.pattern, solution.pattern);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
