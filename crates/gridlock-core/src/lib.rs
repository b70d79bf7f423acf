//! Core data structures for the gridlock solving engine.
//!
//! This crate provides the board model shared by the backtracking and local
//! search engines:
//!
//! - [`cell`]: a single grid cell holding a value 0-9 (0 = empty) and a
//!   `fixed` flag for givens
//! - [`board`]: the 9×9 board with row/column/box views, mutation guarded by
//!   the `fixed` flag, and consistency checks
//! - [`digit_set`]: a 9-bit set over the digits 1-9, used for duplicate
//!   detection, candidate domains, and distinct-value counting
//!
//! # Examples
//!
//! ```
//! use gridlock_core::Board;
//!
//! let board: Board = "
//!     530 070 000
//!     600 195 000
//!     098 000 060
//!     800 060 003
//!     400 803 001
//!     700 020 006
//!     060 000 280
//!     000 419 005
//!     000 080 079
//! "
//! .parse()?;
//!
//! assert!(board.is_valid());
//! assert!(board.is_fixed(0, 0)); // the given '5'
//! assert_eq!(board.value(0, 0), 5);
//! # Ok::<(), gridlock_core::BoardError>(())
//! ```

pub mod board;
pub mod cell;
pub mod digit_set;

pub use self::{
    board::{Board, BoardError},
    cell::Cell,
    digit_set::DigitSet,
};
