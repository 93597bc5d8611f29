//! Configuration settings for the Lights Out solver

use crate::gf2::eliminator::DEFAULT_PARALLEL_THRESHOLD;
use crate::puzzle::solver::DEFAULT_MAX_BOARD_SIZE;
use crate::puzzle::LightsOutSolver;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Matrix row count from which elimination sweeps run in parallel, 0 disables
    pub parallel_threshold: usize,
    /// Include the `unique` flag in service responses
    pub report_uniqueness: bool,
    /// Largest board side accepted by solves, 0 for no limit
    #[serde(default = "default_max_board_size")]
    pub max_board_size: usize,
}

fn default_max_board_size() -> usize {
    DEFAULT_MAX_BOARD_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub board_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_solution: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "visual" => Ok(OutputFormat::Visual),
            other => anyhow::bail!("Unknown output format '{}' (expected text, json or visual)", other),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
                report_uniqueness: false,
                max_board_size: DEFAULT_MAX_BOARD_SIZE,
            },
            input: InputConfig {
                board_file: PathBuf::from("input/boards/all_lit_5x5.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_solution: true,
                output_directory: PathBuf::from("output/solutions"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings before a solve
    pub fn validate(&self) -> Result<()> {
        if !self.input.board_file.exists() {
            anyhow::bail!("Board file does not exist: {}", self.input.board_file.display());
        }

        if self.output.save_solution && self.output.output_directory.as_os_str().is_empty() {
            anyhow::bail!("Output directory must be set when save_solution is enabled");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref board_file) = cli_overrides.board_file {
            self.input.board_file = board_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(threshold) = cli_overrides.parallel_threshold {
            self.solver.parallel_threshold = threshold;
        }
        if let Some(max) = cli_overrides.max_board_size {
            self.solver.max_board_size = max;
        }
    }

    /// Solver configured from these settings
    pub fn build_solver(&self) -> LightsOutSolver {
        let max_board_size = match self.solver.max_board_size {
            0 => None,
            max => Some(max),
        };
        LightsOutSolver::with_parallel_threshold(self.solver.parallel_threshold)
            .with_max_board_size(max_board_size)
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub board_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub parallel_threshold: Option<usize>,
    pub max_board_size: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/settings.yaml");

        let mut settings = Settings::default();
        settings.solver.report_uniqueness = true;
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert!(loaded.solver.report_uniqueness);
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.solver.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_parse_yaml() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("custom.yaml");
        std::fs::write(
            &path,
            "solver:\n  parallel_threshold: 0\n  report_uniqueness: true\n\
             input:\n  board_file: boards/a.txt\n\
             output:\n  format: visual\n  save_solution: false\n  output_directory: out\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.solver.parallel_threshold, 0);
        assert_eq!(settings.output.format, OutputFormat::Visual);
        assert_eq!(settings.input.board_file, PathBuf::from("boards/a.txt"));
        assert_eq!(settings.solver.max_board_size, DEFAULT_MAX_BOARD_SIZE);
    }

    #[test]
    fn test_validate_requires_board_file() {
        let temp_dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.input.board_file = temp_dir.path().join("missing.txt");
        assert!(settings.validate().is_err());

        let board_path = temp_dir.path().join("board.txt");
        std::fs::write(&board_path, "1\n").unwrap();
        settings.input.board_file = board_path;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            board_file: Some(PathBuf::from("x.txt")),
            output_dir: None,
            format: Some(OutputFormat::Json),
            parallel_threshold: Some(64),
            max_board_size: Some(0),
        });

        assert_eq!(settings.input.board_file, PathBuf::from("x.txt"));
        assert_eq!(settings.output.output_directory, PathBuf::from("output/solutions"));
        assert_eq!(settings.output.format, OutputFormat::Json);
        let solver = settings.build_solver();
        assert_eq!(solver.eliminator().parallel_threshold(), 64);
        assert_eq!(solver.max_board_size(), None);

        settings.solver.max_board_size = 10;
        assert_eq!(settings.build_solver().max_board_size(), Some(10));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
