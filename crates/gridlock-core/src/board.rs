//! The 9×9 Sudoku board.
//!
//! [`Board`] is an owned, deep-copyable value type: the search engines clone
//! it at every branch point instead of sharing references, so candidate
//! states can never alias each other.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Cell, DigitSet};

/// Number of rows, columns, and boxes.
pub const SIZE: usize = 9;

/// Number of cells on the board.
pub const CELL_COUNT: usize = SIZE * SIZE;

/// Side length of a box.
pub const BOX_SIZE: usize = 3;

/// An error produced while constructing or parsing a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// A cell value outside the range 0-9.
    #[display("invalid cell value: {value}")]
    InvalidValue {
        /// The offending value.
        value: u8,
    },
    /// A character that is neither a digit, an empty-cell marker, nor
    /// whitespace.
    #[display("unexpected character in grid string: {ch:?}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
    },
    /// A grid string with the wrong number of cells.
    #[display("expected {CELL_COUNT} cells, got {count}")]
    WrongCellCount {
        /// The number of cells found.
        count: usize,
    },
}

/// A 9×9 grid of [`Cell`]s, stored row-major as a flat 81-slot array.
///
/// Equality compares every cell's `(value, fixed)` pair.
///
/// # Examples
///
/// ```
/// use gridlock_core::Board;
///
/// let board = Board::from_values(&[0; 81], false)?;
/// assert_eq!(board.empty_count(), 81);
/// assert!(board.is_valid());
/// # Ok::<(), gridlock_core::BoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

fn index(row: usize, col: usize) -> usize {
    assert!(row < SIZE && col < SIZE, "position out of range: ({row}, {col})");
    row * SIZE + col
}

impl Board {
    /// Creates a fully empty board.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [Cell::EMPTY; CELL_COUNT],
        }
    }

    /// Builds a board from an 81-value row-major sequence, 0 meaning empty.
    ///
    /// When `fix_givens` is `true`, every nonzero input cell becomes a fixed
    /// given; otherwise all cells stay mutable.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidValue`] if any value exceeds 9.
    pub fn from_values(values: &[u8; CELL_COUNT], fix_givens: bool) -> Result<Self, BoardError> {
        let mut cells = [Cell::EMPTY; CELL_COUNT];
        for (cell, &value) in cells.iter_mut().zip(values) {
            if value > 9 {
                return Err(BoardError::InvalidValue { value });
            }
            *cell = Cell::new(value, fix_givens && value != 0);
        }
        Ok(Self { cells })
    }

    /// Returns the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is not in the range 0-8.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[index(row, col)]
    }

    /// Returns the value at (`row`, `col`), 0 meaning empty.
    #[must_use]
    pub fn value(&self, row: usize, col: usize) -> u8 {
        self.cell(row, col).value()
    }

    /// Returns `true` if the cell at (`row`, `col`) is a given.
    #[must_use]
    pub fn is_fixed(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_fixed()
    }

    /// Writes `value` at (`row`, `col`). A no-op if the cell is fixed.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of range or `value` exceeds 9.
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        assert!(value <= 9, "cell value must be between 0 and 9, got {value}");
        let cell = &mut self.cells[index(row, col)];
        if !cell.is_fixed() {
            cell.set_value(value);
        }
    }

    /// Clears the cell at (`row`, `col`). A no-op if the cell is fixed.
    pub fn clear(&mut self, row: usize, col: usize) {
        self.set(row, col, 0);
    }

    /// Returns row `row` as a 9-element array.
    #[must_use]
    pub fn row(&self, row: usize) -> [Cell; SIZE] {
        std::array::from_fn(|col| self.cell(row, col))
    }

    /// Returns column `col` as a 9-element array.
    #[must_use]
    pub fn column(&self, col: usize) -> [Cell; SIZE] {
        std::array::from_fn(|row| self.cell(row, col))
    }

    /// Returns box `box_index` as a 9-element array, flattened row-major.
    ///
    /// Box k covers rows `[(k / 3) * 3, +3)` and columns `[(k % 3) * 3, +3)`.
    #[must_use]
    pub fn box_cells(&self, box_index: usize) -> [Cell; SIZE] {
        std::array::from_fn(|slot| {
            let (row, col) = box_position(box_index, slot);
            self.cell(row, col)
        })
    }

    /// Swaps the cells at box-local positions `a` and `b` of box `box_index`.
    ///
    /// A no-op if either cell is fixed.
    ///
    /// # Panics
    ///
    /// Panics if `box_index`, `a`, or `b` is not in the range 0-8.
    pub fn swap_in_box(&mut self, box_index: usize, a: usize, b: usize) {
        let (row_a, col_a) = box_position(box_index, a);
        let (row_b, col_b) = box_position(box_index, b);
        let ia = index(row_a, col_a);
        let ib = index(row_b, col_b);
        if self.cells[ia].is_fixed() || self.cells[ib].is_fixed() {
            return;
        }
        self.cells.swap(ia, ib);
    }

    /// Returns `false` if row `row`, column `col`, or the box containing
    /// (`row`, `col`) holds a duplicate nonzero value.
    #[must_use]
    pub fn is_consistent(&self, row: usize, col: usize) -> bool {
        !has_duplicate(&self.row(row))
            && !has_duplicate(&self.column(col))
            && !has_duplicate(&self.box_cells(box_index(row, col)))
    }

    /// Returns `true` if no row, column, or box holds a duplicate nonzero
    /// value.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (0..SIZE).all(|i| {
            !has_duplicate(&self.row(i))
                && !has_duplicate(&self.column(i))
                && !has_duplicate(&self.box_cells(i))
        })
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Returns the positions of all empty cells in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| (i / SIZE, i % SIZE))
    }

    /// Returns a canonical packed representation of the full board content.
    ///
    /// Each byte holds the cell value in the low bits and the fixed flag in
    /// bit 4, so two boards pack equal iff they compare equal. Used as the
    /// visited-state set key.
    #[must_use]
    pub fn packed(&self) -> [u8; CELL_COUNT] {
        std::array::from_fn(|i| {
            let cell = self.cells[i];
            cell.value() | (u8::from(cell.is_fixed()) << 4)
        })
    }

    /// Returns the board as an 81-digit string, 0 meaning empty.
    #[must_use]
    pub fn digit_line(&self) -> String {
        self.cells
            .iter()
            .map(|cell| char::from(b'0' + cell.value()))
            .collect()
    }
}

/// Returns the index of the box containing (`row`, `col`).
///
/// # Panics
///
/// Panics if `row` or `col` is not in the range 0-8.
#[must_use]
pub fn box_index(row: usize, col: usize) -> usize {
    let _ = index(row, col);
    (row / BOX_SIZE) * BOX_SIZE + col / BOX_SIZE
}

/// Converts a box index and a box-local slot (0-8, row-major) to a board
/// position.
///
/// # Panics
///
/// Panics if `box_index` or `slot` is not in the range 0-8.
#[must_use]
pub fn box_position(box_index: usize, slot: usize) -> (usize, usize) {
    assert!(box_index < SIZE && slot < SIZE);
    let row = (box_index / BOX_SIZE) * BOX_SIZE + slot / BOX_SIZE;
    let col = (box_index % BOX_SIZE) * BOX_SIZE + slot % BOX_SIZE;
    (row, col)
}

fn has_duplicate(cells: &[Cell; SIZE]) -> bool {
    let mut seen = DigitSet::EMPTY;
    cells
        .iter()
        .filter(|cell| !cell.is_empty())
        .any(|cell| !seen.insert(cell.value()))
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses a grid string.
    ///
    /// Digits 1-9 become fixed givens; `.`, `_`, and `0` denote empty cells;
    /// whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut values = [0_u8; CELL_COUNT];
        let mut count = 0;
        for ch in s.chars() {
            if ch.is_whitespace() {
                continue;
            }
            let value = match ch {
                '.' | '_' | '0' => 0,
                '1'..='9' => ch as u8 - b'0',
                _ => return Err(BoardError::UnexpectedChar { ch }),
            };
            if count < CELL_COUNT {
                values[count] = value;
            }
            count += 1;
        }
        if count != CELL_COUNT {
            return Err(BoardError::WrongCellCount { count });
        }
        Self::from_values(&values, true)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            for col in 0..SIZE {
                if col > 0 {
                    write!(f, "{}", if col % BOX_SIZE == 0 { "  " } else { " " })?;
                }
                let value = self.value(row, col);
                if value == 0 {
                    write!(f, ".")?;
                } else {
                    write!(f, "{value}")?;
                }
            }
            writeln!(f)?;
            if row % BOX_SIZE == BOX_SIZE - 1 && row != SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const SAMPLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_parse_and_digit_line() {
        let board: Board = SAMPLE.parse().unwrap();
        assert_eq!(board.digit_line(), SAMPLE);
        assert_eq!(board.value(0, 0), 5);
        assert!(board.is_fixed(0, 0));
        assert!(!board.is_fixed(0, 2));
        assert!(board.cell(0, 2).is_empty());
    }

    #[test]
    fn test_parse_accepts_empty_markers_and_whitespace() {
        let dotted = SAMPLE.replace('0', ".");
        let board: Board = format!(" {} ", dotted).parse().unwrap();
        assert_eq!(board.digit_line(), SAMPLE);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "x".repeat(81).parse::<Board>(),
            Err(BoardError::UnexpectedChar { ch: 'x' })
        );
        assert_eq!(
            "123".parse::<Board>(),
            Err(BoardError::WrongCellCount { count: 3 })
        );
        assert_eq!(
            "0".repeat(82).parse::<Board>(),
            Err(BoardError::WrongCellCount { count: 82 })
        );
        // The reported count is the full length, not where parsing stopped.
        assert_eq!(
            "0".repeat(100).parse::<Board>(),
            Err(BoardError::WrongCellCount { count: 100 })
        );
    }

    #[test]
    fn test_set_respects_fixed() {
        let mut board: Board = SAMPLE.parse().unwrap();
        board.set(0, 0, 9);
        assert_eq!(board.value(0, 0), 5);
        board.set(0, 2, 4);
        assert_eq!(board.value(0, 2), 4);
        board.clear(0, 2);
        assert_eq!(board.value(0, 2), 0);
    }

    #[test]
    fn test_swap_in_box() {
        let mut board = Board::from_values(&[0; CELL_COUNT], false).unwrap();
        board.set(0, 0, 1);
        board.set(1, 1, 2);
        // Box 0 slots: 0 => (0, 0), 4 => (1, 1).
        board.swap_in_box(0, 0, 4);
        assert_eq!(board.value(0, 0), 2);
        assert_eq!(board.value(1, 1), 1);
    }

    #[test]
    fn test_swap_in_box_refuses_fixed() {
        let mut board: Board = SAMPLE.parse().unwrap();
        let before = board.clone();
        // Box 0 slot 0 is the fixed given '5'.
        board.swap_in_box(0, 0, 2);
        assert_eq!(board, before);
    }

    #[test]
    fn test_is_consistent() {
        let mut board = Board::from_values(&[0; CELL_COUNT], false).unwrap();
        board.set(0, 0, 5);
        board.set(0, 8, 5);
        assert!(!board.is_consistent(0, 8));
        assert!(board.is_consistent(1, 1)); // row 1, column 1, box 0 are clean
        assert!(!board.is_valid());
        board.clear(0, 8);
        assert!(board.is_valid());
    }

    #[test]
    fn test_box_views() {
        let board: Board = SAMPLE.parse().unwrap();
        let values: Vec<u8> = board.box_cells(4).iter().map(|cell| cell.value()).collect();
        // Box 4 covers rows 3-5, columns 3-5.
        assert_eq!(values, vec![0, 6, 0, 8, 0, 3, 0, 2, 0]);
    }

    #[test]
    fn test_packed_distinguishes_fixedness() {
        let fixed: Board = SAMPLE.parse().unwrap();
        let mut values = [0_u8; CELL_COUNT];
        for (i, ch) in SAMPLE.bytes().enumerate() {
            values[i] = ch - b'0';
        }
        let loose = Board::from_values(&values, false).unwrap();
        assert_ne!(fixed.packed(), loose.packed());
        assert_ne!(fixed, loose);
    }

    proptest! {
        #[test]
        fn prop_views_agree_with_cells(values in prop::collection::vec(0_u8..=9, CELL_COUNT)) {
            let values: [u8; CELL_COUNT] = values.try_into().unwrap();
            let board = Board::from_values(&values, true).unwrap();
            for row in 0..SIZE {
                for col in 0..SIZE {
                    let cell = board.cell(row, col);
                    prop_assert_eq!(board.row(row)[col], cell);
                    prop_assert_eq!(board.column(col)[row], cell);
                    let b = box_index(row, col);
                    let slot = (row % BOX_SIZE) * BOX_SIZE + col % BOX_SIZE;
                    prop_assert_eq!(board.box_cells(b)[slot], cell);
                    prop_assert_eq!(cell.is_fixed(), cell.value() != 0);
                }
            }
        }
    }
}
