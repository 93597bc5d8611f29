//! Lights Out solving: orchestration, answers and validation

pub mod problem;
pub mod solution;
pub mod solver;
pub mod validator;

pub use problem::LightsOutProblem;
pub use solution::{PressPattern, Solution, SolutionMetadata, SolutionSummary};
pub use solver::{LightsOutSolver, SystemAnalysis};
pub use validator::{SolutionValidator, ValidationResult};
