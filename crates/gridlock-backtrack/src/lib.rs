//! Systematic backtracking search for Sudoku.
//!
//! This crate implements three interchangeable depth-first strategies over
//! one state machine:
//!
//! - **Chronological backtracking** ([`Strategy::Chronological`]): every
//!   empty cell tries the static candidate set 1-9 in row-major order, with
//!   a row/column/box consistency check per assignment.
//! - **Forward checking** ([`Strategy::ForwardChecking`]): a live
//!   [`DomainStore`] prunes each assignment's value from the domains of its
//!   peers; an empty peer domain rejects the assignment even without a
//!   direct clash.
//! - **Most-constrained-variable** ([`Strategy::MostConstrained`]): forward
//!   checking with the not-yet-committed cells re-ordered by ascending
//!   domain size.
//!
//! # Examples
//!
//! ```
//! use gridlock_backtrack::{Solution, Strategy, solve};
//! use gridlock_core::Board;
//!
//! let board: Board =
//!     "530070000600195000098000060800060003400803001700020006060000280000419005000080079"
//!         .parse()?;
//!
//! match solve(&board, Strategy::ForwardChecking) {
//!     Solution::Solved { board, iterations } => {
//!         assert!(board.is_valid());
//!         assert!(iterations > 0);
//!     }
//!     Solution::Unsat => unreachable!("the sample puzzle is solvable"),
//! }
//! # Ok::<(), gridlock_core::BoardError>(())
//! ```

pub mod domain;
pub mod engine;

pub use self::{
    domain::{DomainInconsistency, DomainStore, Propagation},
    engine::{Solution, Strategy, solve},
};
