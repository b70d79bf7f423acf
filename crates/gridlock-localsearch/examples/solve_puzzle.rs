//! Example solving a puzzle with any of the available engines.
//!
//! The puzzle is an 81-character string in row-major order, digits for givens
//! and `.`, `_` or `0` for empty cells.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example solve_puzzle -- \
//!     530070000600195000098000060800060003400803001700020006060000280000419005000080079
//! ```
//!
//! Select the engine (cbt, fc, mcv or ils):
//!
//! ```sh
//! cargo run --example solve_puzzle -- --engine mcv <PUZZLE>
//! ```
//!
//! The local search engine accepts a seed, a perturbation distance and an
//! iteration budget:
//!
//! ```sh
//! cargo run --example solve_puzzle -- --engine ils --seed 7 --walk-distance 4 <PUZZLE>
//! ```

use std::process;

use clap::{Parser, ValueEnum};
use gridlock_backtrack::{Solution, Strategy};
use gridlock_core::Board;
use gridlock_localsearch::{IteratedLocalSearch, VisitedStates, evaluate};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Engine {
    Cbt,
    Fc,
    Mcv,
    Ils,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The puzzle as 81 characters, row by row.
    #[arg(value_name = "PUZZLE")]
    puzzle: String,

    /// Solving engine to use.
    #[arg(long, value_name = "ENGINE", default_value = "fc")]
    engine: Engine,

    /// Seed for the local search random number generator.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    seed: u64,

    /// Swaps applied per perturbation when the local search stalls.
    #[arg(long, value_name = "COUNT", default_value_t = 4)]
    walk_distance: usize,

    /// Local search iteration budget.
    #[arg(long, value_name = "COUNT", default_value_t = 100_000)]
    max_iterations: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board: Board = match args.puzzle.parse() {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Invalid puzzle: {e}");
            process::exit(2);
        }
    };

    println!("Puzzle:");
    println!("{board}");
    println!();

    match args.engine {
        Engine::Cbt => run_backtrack(&board, Strategy::Chronological),
        Engine::Fc => run_backtrack(&board, Strategy::ForwardChecking),
        Engine::Mcv => run_backtrack(&board, Strategy::MostConstrained),
        Engine::Ils => run_local_search(board, &args),
    }
}

fn run_backtrack(board: &Board, strategy: Strategy) {
    match gridlock_backtrack::solve(board, strategy) {
        Solution::Solved { board, iterations } => {
            println!("Solution ({}):", strategy.name());
            println!("{board}");
            println!();
            println!("Iterations: {iterations}");
        }
        Solution::Unsat => {
            println!("No solution exists.");
            process::exit(1);
        }
    }
}

fn run_local_search(mut board: Board, args: &Args) {
    let mut ils = IteratedLocalSearch::from_seed(args.seed);
    ils.init_state(&mut board);

    let mut visited = VisitedStates::new();
    let (result, iterations) =
        ils.solve(board, &mut visited, args.walk_distance, args.max_iterations);

    let score = evaluate(&result);
    if score == 0 {
        println!("Solution (ils):");
    } else {
        println!("Best effort (ils), score {score}:");
    }
    println!("{result}");
    println!();
    println!("Iterations: {iterations}");
    println!("Visited states: {}", visited.len());

    if score != 0 {
        process::exit(1);
    }
}
