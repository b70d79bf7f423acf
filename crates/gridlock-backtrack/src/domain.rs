//! Candidate domains and forward-checking propagation.
//!
//! [`DomainStore`] keeps one [`DigitSet`] of remaining candidates per board
//! cell, indexed by `row * 9 + col`. Only non-fixed, still-empty cells have a
//! live domain; everything else holds the empty set.
//!
//! Propagation is journaled: [`DomainStore::propagate`] records exactly the
//! peers it changed in a [`Propagation`], and
//! [`DomainStore::undo_propagate`] restores exactly that set. Two givens that
//! share no house can both peer the same empty cell, so a propagated value
//! may already be absent from a peer's domain; the journal keeps the pair a
//! true inverse regardless.

use gridlock_core::{
    Board, DigitSet,
    board::{CELL_COUNT, SIZE, box_index, box_position},
};
use tinyvec::ArrayVec;

/// An invariant violation in a single-cell domain mutation.
///
/// One of these firing indicates a bookkeeping bug in the caller, not a
/// recoverable puzzle condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DomainInconsistency {
    /// Attempted to remove a value that is not in the cell's domain.
    #[display("value {value} is not in the domain of cell ({row}, {col})")]
    MissingCandidate {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
        /// The value that was absent.
        value: u8,
    },
    /// Attempted to restore a value that is already in the cell's domain.
    #[display("value {value} is already in the domain of cell ({row}, {col})")]
    DuplicateCandidate {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
        /// The value that was already present.
        value: u8,
    },
}

/// The journal of one propagation: the assigned value and the cells whose
/// domains actually lost it.
///
/// At most 20 cells share a row, column, or box with the assigned cell, so
/// the journal lives on the stack.
#[derive(Debug, Clone, Default)]
pub struct Propagation {
    value: u8,
    cells: ArrayVec<[u16; 20]>,
}

impl Propagation {
    /// Returns the propagated value.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns the number of domains the propagation changed.
    #[must_use]
    pub fn changed(&self) -> usize {
        self.cells.len()
    }
}

/// Per-cell candidate domains for one solve attempt.
#[derive(Debug, Clone)]
pub struct DomainStore {
    domains: [DigitSet; CELL_COUNT],
}

fn index(row: usize, col: usize) -> usize {
    assert!(row < SIZE && col < SIZE, "position out of range: ({row}, {col})");
    row * SIZE + col
}

/// Iterates the row, column, and box peers of (`row`, `col`), excluding the
/// cell itself. Cells where the box overlaps the row or column appear twice;
/// callers must be idempotent.
fn peers(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    let row_peers = (0..SIZE).filter(move |&c| c != col).map(move |c| (row, c));
    let col_peers = (0..SIZE).filter(move |&r| r != row).map(move |r| (r, col));
    let box_peers = (0..SIZE)
        .map(move |slot| box_position(box_index(row, col), slot))
        .filter(move |&pos| pos != (row, col));
    row_peers.chain(col_peers).chain(box_peers)
}

impl DomainStore {
    /// Creates the initial domains for `board`: every non-fixed empty cell
    /// gets the full candidate set 1-9, filled and fixed cells get none.
    #[must_use]
    pub fn new(board: &Board) -> Self {
        let mut domains = [DigitSet::EMPTY; CELL_COUNT];
        for (row, col) in board.empty_positions() {
            if !board.is_fixed(row, col) {
                domains[index(row, col)] = DigitSet::FULL;
            }
        }
        Self { domains }
    }

    /// Returns the remaining candidates of the cell at (`row`, `col`).
    #[must_use]
    pub fn candidates(&self, row: usize, col: usize) -> DigitSet {
        self.domains[index(row, col)]
    }

    /// Removes each filled cell's value from the domains of its empty peers.
    ///
    /// Idempotent per value: two givens that both peer the same empty cell
    /// remove the value once between them.
    pub fn prune_givens(&mut self, board: &Board) {
        for row in 0..SIZE {
            for col in 0..SIZE {
                let value = board.value(row, col);
                if value == 0 {
                    continue;
                }
                for (r, c) in peers(row, col) {
                    self.domains[index(r, c)].remove(value);
                }
            }
        }
    }

    /// Removes `value` from the domain of the cell at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns [`DomainInconsistency::MissingCandidate`] if the value is not
    /// present.
    pub fn remove(&mut self, row: usize, col: usize, value: u8) -> Result<(), DomainInconsistency> {
        if self.domains[index(row, col)].remove(value) {
            Ok(())
        } else {
            Err(DomainInconsistency::MissingCandidate { row, col, value })
        }
    }

    /// Restores `value` to the domain of the cell at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns [`DomainInconsistency::DuplicateCandidate`] if the value is
    /// already present.
    pub fn restore(&mut self, row: usize, col: usize, value: u8) -> Result<(), DomainInconsistency> {
        if self.domains[index(row, col)].insert(value) {
            Ok(())
        } else {
            Err(DomainInconsistency::DuplicateCandidate { row, col, value })
        }
    }

    /// Propagates the assignment at (`row`, `col`): removes its value from
    /// the domain of every other non-fixed, still-empty peer sharing the row,
    /// column, or box, and returns the journal of cells changed.
    ///
    /// # Panics
    ///
    /// Panics if the cell at (`row`, `col`) is empty.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)] // cell indices are < 81
    pub fn propagate(&mut self, board: &Board, row: usize, col: usize) -> Propagation {
        let value = board.value(row, col);
        assert!(value != 0, "cannot propagate an empty cell");
        let mut record = Propagation {
            value,
            cells: ArrayVec::new(),
        };
        for (r, c) in peers(row, col) {
            let cell = board.cell(r, c);
            if cell.is_fixed() || !cell.is_empty() {
                continue;
            }
            let i = index(r, c);
            if self.domains[i].remove(value) {
                record.cells.push(i as u16);
            }
        }
        record
    }

    /// Undoes a propagation, restoring the value to exactly the peer set the
    /// journal recorded.
    pub fn undo_propagate(&mut self, record: &Propagation) {
        for &i in &record.cells {
            let inserted = self.domains[usize::from(i)].insert(record.value);
            debug_assert!(inserted, "undo of a value that was never removed");
        }
    }

    /// Returns `true` iff some non-fixed, still-empty cell has an empty
    /// domain.
    #[must_use]
    pub fn any_domain_empty(&self, board: &Board) -> bool {
        board.empty_positions().any(|(row, col)| {
            !board.is_fixed(row, col) && self.domains[index(row, col)].is_empty()
        })
    }
}
