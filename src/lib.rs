//! Lights Out Solver
//!
//! Solves the Lights Out puzzle by Gaussian elimination over GF(2): the
//! board becomes a linear system whose solution is the set of cells to press.

pub mod board;
pub mod config;
pub mod error;
pub mod gf2;
pub mod puzzle;
pub mod service;
pub mod utils;

pub use board::Board;
pub use config::Settings;
pub use error::LightsOutError;
pub use puzzle::{LightsOutProblem, LightsOutSolver, PressPattern, Solution};
pub use service::LightsOutService;

use anyhow::Result;

/// Main entry point: solve the board configured in `settings`
pub fn solve_lights_out(settings: &Settings) -> Result<Solution> {
    let problem = LightsOutProblem::new(settings)?;
    problem.solve()
}
