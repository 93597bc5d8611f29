//! Benchmark of GF(2) elimination across board sizes
//!
//! Times sequential and parallel XOR sweeps on all-lit boards and checks
//! that both produce the same press pattern.

use anyhow::{Context, Result};
use lights_out_solver::{puzzle::SolutionValidator, Board, LightsOutSolver};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct BenchmarkResult {
    size: usize,
    parallel: bool,
    run_times: Vec<Duration>,
    presses: usize,
    unique: bool,
}

impl BenchmarkResult {
    fn average(&self) -> Duration {
        let total: Duration = self.run_times.iter().sum();
        total / self.run_times.len().max(1) as u32
    }

    fn min(&self) -> Duration {
        self.run_times.iter().min().copied().unwrap_or_default()
    }

    fn display(&self) -> String {
        format!(
            "  {:>3}x{:<3} {:<10} avg {:>10.3}ms | min {:>10.3}ms | presses {:>4} | {}",
            self.size,
            self.size,
            if self.parallel { "parallel" } else { "sequential" },
            self.average().as_secs_f64() * 1000.0,
            self.min().as_secs_f64() * 1000.0,
            self.presses,
            if self.unique { "unique" } else { "several" }
        )
    }
}

fn run(size: usize, parallel: bool, runs: usize) -> Result<BenchmarkResult> {
    let solver = if parallel {
        LightsOutSolver::with_parallel_threshold(1)
    } else {
        LightsOutSolver::with_parallel_threshold(0)
    };
    let board = Board::all_lit(size)?;
    let validator = SolutionValidator::new();

    let mut result = BenchmarkResult {
        size,
        parallel,
        run_times: Vec::with_capacity(runs),
        presses: 0,
        unique: false,
    };

    for _ in 0..runs {
        let start = Instant::now();
        let solution = solver
            .solve_detailed(&board)
            .with_context(|| format!("{}x{} all-lit board failed", size, size))?;
        result.run_times.push(start.elapsed());

        if !validator.quick_validate(&board, &solution.pattern) {
            anyhow::bail!("{}x{} pattern does not clear the board", size, size);
        }
        result.presses = solution.metadata.press_count;
        result.unique = solution.unique;
    }

    Ok(result)
}

fn main() -> Result<()> {
    let sizes = [5, 10, 15, 20, 30, 40];
    let runs = 3;

    println!("=== GF(2) Elimination Benchmark ({} runs each) ===\n", runs);

    for size in sizes {
        let sequential = run(size, false, runs)?;
        let parallel = run(size, true, runs)?;
        println!("{}", sequential.display());
        println!("{}", parallel.display());

        let speedup = sequential.average().as_secs_f64() / parallel.average().as_secs_f64().max(1e-9);
        println!("  speedup: {:.2}x\n", speedup);
    }

    Ok(())
}
