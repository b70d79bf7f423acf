//! Iterated local search for repairing a fully populated Sudoku grid.
//!
//! Where the backtracking strategies build a solution cell by cell, this
//! engine starts from a complete grid in which every 3×3 box is a permutation
//! of 1-9 ([`IteratedLocalSearch::init_state`]) and hill-climbs by swapping
//! two non-fixed cells inside one box at a time. Box validity is structural
//! and never re-checked; the [`evaluate`] score only counts row and column
//! defects, and reaching score 0 means the grid is solved.
//!
//! When the climb stalls (a plateau of non-improving moves, or every box
//! tried without an acceptable neighbor) a random walk perturbs the grid and
//! the climb restarts, bounded by an iteration budget. A [`VisitedStates`]
//! set guards against cycling back to configurations already produced.
//!
//! # Examples
//!
//! ```
//! use gridlock_core::Board;
//! use gridlock_localsearch::{IteratedLocalSearch, VisitedStates, evaluate};
//!
//! let mut board: Board =
//!     "530070000600195000098000060800060003400803001700020006060000280000419005000080079"
//!         .parse()?;
//!
//! let mut ils = IteratedLocalSearch::from_seed(42);
//! ils.init_state(&mut board);
//!
//! let mut visited = VisitedStates::new();
//! let (result, iterations) = ils.solve(board, &mut visited, 4, 50_000);
//! if evaluate(&result) == 0 {
//!     assert!(result.is_valid());
//! } else {
//!     assert_eq!(iterations, 50_000); // budget exhausted, best effort
//! }
//! # Ok::<(), gridlock_core::BoardError>(())
//! ```

pub mod evaluate;
pub mod search;
pub mod visited;

pub use self::{
    evaluate::evaluate,
    search::{IteratedLocalSearch, StepOutcome},
    visited::VisitedStates,
};
