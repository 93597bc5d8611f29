//! Error types for the Lights Out solver core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightsOutError {
    #[error("Invalid board shape: {reason}")]
    InvalidBoardShape { reason: String },

    #[error("Inconsistent system: row {row} reduces to 0 = 1, the board cannot be cleared")]
    InconsistentSystem { row: usize },
}

impl LightsOutError {
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        LightsOutError::InvalidBoardShape {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LightsOutError>;
