//! Validation of press patterns against boards

use super::PressPattern;
use crate::board::{Board, LightsOutRules};
use anyhow::Result;

/// Checks that a press pattern turns a board fully off
#[derive(Debug, Clone, Default)]
pub struct SolutionValidator;

/// Result of validating a pattern
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Board after every press in the pattern, when sizes match
    pub final_board: Option<Board>,
    pub remaining_lit: Vec<(usize, usize)>,
    pub press_count: usize,
    pub error_message: Option<String>,
}

impl SolutionValidator {
    pub fn new() -> Self {
        Self
    }

    /// Apply the pattern and report whether any light stays on
    pub fn validate(&self, board: &Board, pattern: &PressPattern) -> Result<ValidationResult> {
        if board.size() != pattern.size() {
            return Ok(ValidationResult {
                is_valid: false,
                final_board: None,
                remaining_lit: vec![],
                press_count: pattern.press_count(),
                error_message: Some(format!(
                    "Size mismatch: board {}x{}, pattern {}x{}",
                    board.size(),
                    board.size(),
                    pattern.size(),
                    pattern.size()
                )),
            });
        }

        let final_board = LightsOutRules::apply_pattern(board, pattern)?;
        let remaining_lit = final_board.lit_cells();
        let is_valid = remaining_lit.is_empty();

        let error_message = if is_valid {
            None
        } else {
            Some(Self::describe_remaining(&remaining_lit))
        };

        Ok(ValidationResult {
            is_valid,
            final_board: Some(final_board),
            remaining_lit,
            press_count: pattern.press_count(),
            error_message,
        })
    }

    /// Quick check that only looks at the final board
    pub fn quick_validate(&self, board: &Board, pattern: &PressPattern) -> bool {
        LightsOutRules::clears(board, pattern)
    }

    fn describe_remaining(remaining: &[(usize, usize)]) -> String {
        let mut message = format!("{} light(s) remain on", remaining.len());
        for (i, (row, col)) in remaining.iter().take(3).enumerate() {
            message.push_str(if i == 0 { ": " } else { ", " });
            message.push_str(&format!("({}, {})", row, col));
        }
        if remaining.len() > 3 {
            message.push_str(&format!(" ... and {} more", remaining.len() - 3));
        }
        message
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        writeln!(f, "  Presses: {}", self.press_count)?;
        writeln!(f, "  Lights remaining: {}", self.remaining_lit.len())?;
        if let Some(ref error) = self.error_message {
            writeln!(f, "  Error: {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pattern() {
        let board = Board::from_rows(&[vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]]).unwrap();
        let pattern = PressPattern::from_flat(3, vec![0, 0, 0, 0, 1, 0, 0, 0, 0]).unwrap();

        let result = SolutionValidator::new().validate(&board, &pattern).unwrap();
        assert!(result.is_valid);
        assert!(result.error_message.is_none());
        assert!(result.final_board.unwrap().is_cleared());
        assert_eq!(result.press_count, 1);
    }

    #[test]
    fn test_invalid_pattern() {
        let board = Board::all_lit(2).unwrap();
        let pattern = PressPattern::zeros(2).unwrap();

        let validator = SolutionValidator::new();
        let result = validator.validate(&board, &pattern).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.remaining_lit.len(), 4);
        assert!(result
            .error_message
            .unwrap()
            .starts_with("4 light(s) remain on: (0, 0), (0, 1), (1, 0) ... and 1 more"));
        assert!(!validator.quick_validate(&board, &pattern));
    }

    #[test]
    fn test_size_mismatch() {
        let result = SolutionValidator::new()
            .validate(&Board::new(3).unwrap(), &PressPattern::zeros(2).unwrap())
            .unwrap();
        assert!(!result.is_valid);
        assert!(result.final_board.is_none());
        assert!(result.error_message.unwrap().contains("Size mismatch"));
    }
}
