//! Main CLI application for the Lights Out solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use axum::http::Method;
use lights_out_solver::{
    board::{create_example_boards, load_board_from_file, load_boards_from_directory, save_board_to_file},
    config::{CliOverrides, OutputFormat, Settings},
    puzzle::{LightsOutProblem, PressPattern, SolutionValidator},
    service::LightsOutService,
    utils::{ColorOutput, SolutionFormatter},
    Board,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "lights_out_solver")]
#[command(about = "Lights Out solver using Gaussian elimination over GF(2)")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a Lights Out board
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board file (overrides config)
        #[arg(short, long)]
        board: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: text, json or visual (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Row count from which elimination runs in parallel (overrides config)
        #[arg(long)]
        parallel_threshold: Option<usize>,

        /// Largest board side to solve, 0 for no limit (overrides config)
        #[arg(long)]
        max_board_size: Option<usize>,

        /// Show the board after every press
        #[arg(long)]
        show_steps: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and board files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Also write a random board of this size
        #[arg(short, long)]
        random: Option<usize>,
    },

    /// Check that a press pattern clears a board
    Validate {
        /// Board file
        #[arg(short, long)]
        board: PathBuf,

        /// Press pattern file, same format as boards ('1' = press)
        #[arg(short, long)]
        pattern: PathBuf,

        /// Print the board left after pressing
        #[arg(long)]
        show_board: bool,
    },

    /// Report rank, free variables and solvability of a board
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board file, or a directory of `.txt` boards
        #[arg(short, long)]
        board: PathBuf,
    },

    /// Run one JSON request through the solve service
    Request {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// HTTP method
        #[arg(short, long, default_value = "POST")]
        method: String,

        /// Request path
        #[arg(short, long, default_value = "/solve")]
        path: String,

        /// File holding the JSON body
        #[arg(short, long)]
        body: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Solve { verbose: true, .. });
    init_tracing(verbose)?;

    match cli.command {
        Commands::Solve {
            config,
            board,
            output,
            format,
            parallel_threshold,
            max_board_size,
            show_steps,
            verbose,
        } => {
            let overrides = CliOverrides {
                board_file: board,
                output_dir: output,
                format,
                parallel_threshold,
                max_board_size,
            };
            solve_command(config, overrides, show_steps, verbose)
        }
        Commands::Setup {
            directory,
            force,
            random,
        } => setup_command(directory, force, random),
        Commands::Validate {
            board,
            pattern,
            show_board,
        } => validate_command(board, pattern, show_board),
        Commands::Analyze { config, board } => analyze_command(config, board),
        Commands::Request {
            config,
            method,
            path,
            body,
        } => request_command(config, method, path, body),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

fn load_settings(config_path: &Path) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    show_steps: bool,
    verbose: bool,
) -> Result<()> {
    println!("{}", ColorOutput::info("💡 Starting Lights Out Solver"));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);

    if verbose {
        println!("Configuration:");
        println!("  Board file: {}", settings.input.board_file.display());
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!("  Format: {:?}", settings.output.format);
        println!("  Parallel threshold: {}", settings.solver.parallel_threshold);
        println!("  Max board size: {}", settings.solver.max_board_size);
        println!();
    }

    settings.validate().context("Configuration validation failed")?;

    let start_time = Instant::now();
    let problem = LightsOutProblem::new(&settings).context("Failed to create problem")?;

    if verbose {
        println!("{}", problem.equation_statistics());
    }

    println!("{}", ColorOutput::info("🧮 Building GF(2) system and eliminating..."));
    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(e) => {
            println!("{}", ColorOutput::error("❌ This board cannot be cleared"));
            return Err(e);
        }
    };

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ Solved in {:.3}s: {} press(es)",
            start_time.elapsed().as_secs_f64(),
            solution.metadata.press_count
        ))
    );
    println!("{}", solution.summary());

    println!("\n{}", SolutionFormatter::format_solution(&solution, show_steps));

    if settings.output.save_solution {
        let path = SolutionFormatter::save_solution(
            &solution,
            &settings.output.output_directory,
            settings.output.format,
        )
        .context("Failed to save solution")?;
        println!("{}", ColorOutput::success(&format!("Solution saved to {}", path.display())));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool, random: Option<usize>) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/boards");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_boards(&input_dir).context("Failed to create example boards")?;
    println!("Created example boards in: {}", input_dir.display());

    if let Some(size) = random {
        let board = Board::random(size).context("Failed to generate random board")?;
        let path = input_dir.join(format!("random_{}x{}.txt", size, size));
        save_board_to_file(&board, &path)?;
        println!("Created: {}", path.display());
    }

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut json_config = Settings::default();
    json_config.input.board_file = PathBuf::from("input/boards/checker_4x4.txt");
    json_config.output.format = OutputFormat::Json;
    json_config.solver.report_uniqueness = true;
    json_config.to_file(examples_dir.join("json.yaml"))?;

    let mut visual_config = Settings::default();
    visual_config.input.board_file = PathBuf::from("input/boards/cross_3x3.txt");
    visual_config.output.format = OutputFormat::Visual;
    visual_config.to_file(examples_dir.join("visual.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your boards to {}", input_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn validate_command(board_path: PathBuf, pattern_path: PathBuf, show_board: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🔍 Validating press pattern..."));

    let board = load_board_from_file(&board_path)
        .with_context(|| format!("Failed to load board from {}", board_path.display()))?;
    let pattern = load_board_from_file(&pattern_path)
        .map(|pattern_board| PressPattern::from_board(&pattern_board))
        .with_context(|| format!("Failed to load pattern from {}", pattern_path.display()))?;

    let result = SolutionValidator::new()
        .validate(&board, &pattern)
        .context("Validation failed")?;

    println!("{}", result);

    if show_board {
        if let Some(ref final_board) = result.final_board {
            println!("Board after pressing:");
            println!("{}", SolutionFormatter::format_board_with_coords(final_board));
        }
    }

    if result.is_valid {
        println!("{}", ColorOutput::success("✅ Pattern clears the board!"));
    } else {
        println!("{}", ColorOutput::error("❌ Pattern does not clear the board"));
    }

    Ok(())
}

fn analyze_command(config_path: PathBuf, board_path: PathBuf) -> Result<()> {
    println!("{}", ColorOutput::info("🔬 Analyzing board..."));

    let settings = load_settings(&config_path)?;
    if board_path.is_dir() {
        return analyze_directory(&settings, &board_path);
    }

    let board = load_board_from_file(&board_path)
        .with_context(|| format!("Failed to load board from {}", board_path.display()))?;

    println!("Board ({}x{}):", board.size(), board.size());
    println!("{}", SolutionFormatter::format_board_with_coords(&board));
    println!("Lit cells: {} of {}", board.lit_count(), board.cell_count());

    let problem = LightsOutProblem::with_board(&settings, board);
    println!("\n{}", problem.equation_statistics());

    let analysis = problem.analyze();
    println!("{}", analysis);

    Ok(())
}

/// One line per board: rank, nullity and whether the solver's answer clears it
fn analyze_directory(settings: &Settings, dir: &Path) -> Result<()> {
    let boards = load_boards_from_directory(dir)?;
    if boards.is_empty() {
        println!("{}", ColorOutput::warning(&format!("No boards found in {}", dir.display())));
        return Ok(());
    }

    let solver = settings.build_solver();
    let validator = SolutionValidator::new();

    for (name, board) in boards {
        let analysis = solver.analyze(&board);
        let verdict = match solver.solve(&board) {
            Ok(pattern) if validator.quick_validate(&board, &pattern) => {
                ColorOutput::success(&format!("solved with {} press(es)", pattern.press_count()))
            }
            Ok(_) => ColorOutput::error("pattern failed validation"),
            Err(e) => ColorOutput::warning(&e.to_string()),
        };
        println!(
            "{:<20} {:>3}x{:<3} rank {:>4}  free {:>3}  {}",
            name,
            board.size(),
            board.size(),
            analysis.rank,
            analysis.nullity(),
            verdict
        );
    }

    Ok(())
}

fn request_command(
    config_path: PathBuf,
    method: String,
    path: String,
    body_path: Option<PathBuf>,
) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let body = match body_path {
        Some(ref p) => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read request body from {}", p.display()))?,
        None => String::new(),
    };

    let method: Method = method
        .to_ascii_uppercase()
        .parse()
        .with_context(|| format!("Invalid HTTP method: {}", method))?;

    let service = LightsOutService::from_settings(&settings);
    let response = service.handle(&method, &path, &body);

    let pretty = serde_json::to_string_pretty(&response.body).context("Failed to format response")?;
    let status_line = format!("{} {} -> {}", method, path, response.status);
    if response.is_success() {
        println!("{}", ColorOutput::success(&status_line));
    } else {
        println!("{}", ColorOutput::error(&status_line));
    }
    println!("{}", pretty);

    Ok(())
}
