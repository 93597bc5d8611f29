//! Walkthrough of the solver on a few classic boards
//!
//! Shows a unique solution, a board with several solutions and a board that
//! cannot be cleared, plus the same requests through the service boundary.

use axum::http::Method;
use lights_out_solver::{
    board::LightsOutRules,
    service::LightsOutService,
    utils::SolutionFormatter,
    Board, LightsOutError, LightsOutSolver,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Lights Out Solver Demonstration ===\n");

    let solver = LightsOutSolver::default();

    println!("Board 1: 3x3 cross (full rank, unique answer)");
    let cross = Board::from_rows(&[vec![0, 1, 0], vec![1, 1, 1], vec![0, 1, 0]])?;
    let solution = solver.solve_detailed(&cross)?;
    println!("{}", SolutionFormatter::format_solution(&solution, true));

    println!("Board 2: 5x5 all lit (rank 23, four answers)");
    let all_lit = Board::all_lit(5)?;
    let solution = solver.solve_detailed(&all_lit)?;
    println!("{}", SolutionFormatter::format_overlay(&all_lit, &solution.pattern));
    println!("Free variables: {:?}", solution.free_variables);
    let cleared = LightsOutRules::apply_pattern(&all_lit, &solution.pattern)?;
    println!("Cleared after pressing: {}\n", cleared.is_cleared());

    println!("Board 3: 5x5 with one corner lit");
    let mut corner = Board::new(5)?;
    corner.set(0, 0, true)?;
    match solver.solve(&corner) {
        Err(LightsOutError::InconsistentSystem { row }) => {
            println!("No solution: reduced row {} reads 0 = 1\n", row)
        }
        Err(e) => return Err(e.into()),
        Ok(_) => return Err("expected the corner board to be unsolvable".into()),
    }

    println!("Service requests:");
    let service = LightsOutService::new(solver).with_uniqueness_report(true);
    for (method, path, body) in [
        (Method::POST, "/solve", r#"{"board": [[1, 1], [1, 0]]}"#),
        (Method::POST, "/solve", r#"{"board": [[1, 0], [1]]}"#),
        (Method::POST, "/solve", "{}"),
        (Method::GET, "/health", ""),
    ] {
        println!("  {} {} -> {}", method, path, service.handle(&method, path, body));
    }

    Ok(())
}
