//! The visited-state cycle guard.

use std::collections::HashSet;

use gridlock_core::{Board, board::CELL_COUNT};

/// A set of previously produced complete boards, keyed by the canonical
/// packed content (values plus fixed flags).
///
/// Used by the local search to avoid revisiting a configuration. The set
/// grows unboundedly for the session; call [`VisitedStates::clear`] between
/// independent runs.
#[derive(Debug, Clone, Default)]
pub struct VisitedStates {
    seen: HashSet<[u8; CELL_COUNT]>,
}

impl VisitedStates {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `board`, returning `true` if it was not seen before.
    pub fn insert(&mut self, board: &Board) -> bool {
        self.seen.insert(board.packed())
    }

    /// Returns `true` if `board` was recorded before.
    #[must_use]
    pub fn contains(&self, board: &Board) -> bool {
        self.seen.contains(&board.packed())
    }

    /// Returns the number of recorded boards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns `true` if no board was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forgets all recorded boards.
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_contains_clear() {
        let mut visited = VisitedStates::new();
        let board = Board::empty();
        assert!(visited.is_empty());
        assert!(!visited.contains(&board));
        assert!(visited.insert(&board));
        assert!(!visited.insert(&board));
        assert!(visited.contains(&board));
        assert_eq!(visited.len(), 1);
        visited.clear();
        assert!(visited.is_empty());
    }

    #[test]
    fn test_fixedness_changes_the_key() {
        let mut values = [0_u8; CELL_COUNT];
        values[0] = 5;
        let fixed = Board::from_values(&values, true).unwrap();
        let loose = Board::from_values(&values, false).unwrap();
        let mut visited = VisitedStates::new();
        visited.insert(&fixed);
        assert!(!visited.contains(&loose));
    }
}
