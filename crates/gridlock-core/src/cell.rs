//! A single board cell.

/// One cell of a Sudoku board: a value 0-9 (0 = empty) and a `fixed` flag.
///
/// The `fixed` flag marks givens. It is set once when the board is built and
/// never changes afterwards; all board mutations refuse to touch fixed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    value: u8,
    fixed: bool,
}

impl Cell {
    /// An empty, non-fixed cell.
    pub const EMPTY: Self = Self {
        value: 0,
        fixed: false,
    };

    /// Creates a cell with the given value and fixedness.
    ///
    /// # Panics
    ///
    /// Panics if `value` is greater than 9.
    #[must_use]
    pub fn new(value: u8, fixed: bool) -> Self {
        assert!(value <= 9, "cell value must be between 0 and 9, got {value}");
        Self { value, fixed }
    }

    /// Returns the cell value (0 = empty).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Returns `true` if the cell is a given.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        self.fixed
    }

    /// Returns `true` if the cell holds no value.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.value == 0
    }

    pub(crate) fn set_value(&mut self, value: u8) {
        debug_assert!(value <= 9);
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let cell = Cell::new(5, true);
        assert_eq!(cell.value(), 5);
        assert!(cell.is_fixed());
        assert!(!cell.is_empty());
        assert!(Cell::EMPTY.is_empty());
    }

    #[test]
    #[should_panic(expected = "cell value must be")]
    fn test_new_rejects_out_of_range() {
        let _ = Cell::new(10, false);
    }
}
