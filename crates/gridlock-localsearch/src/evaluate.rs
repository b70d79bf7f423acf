//! The local search evaluation function.

use gridlock_core::{Board, Cell, DigitSet, board::SIZE};

/// Scores a board for local search: the sum over all 9 rows and 9 columns of
/// `9 - |distinct nonzero values present|`.
///
/// A score of 0 means every row and column holds all nine digits exactly
/// once. Boxes are not evaluated; the search keeps them valid structurally.
///
/// # Examples
///
/// ```
/// use gridlock_core::Board;
/// use gridlock_localsearch::evaluate;
///
/// let solved: Board =
///     "534678912672195348198342567859761423426853791713924856961537284287419635345286179"
///         .parse()?;
/// assert_eq!(evaluate(&solved), 0);
/// # Ok::<(), gridlock_core::BoardError>(())
/// ```
#[must_use]
pub fn evaluate(board: &Board) -> u32 {
    (0..SIZE)
        .map(|i| line_score(&board.row(i)) + line_score(&board.column(i)))
        .sum()
}

fn line_score(cells: &[Cell; SIZE]) -> u32 {
    let distinct: DigitSet = cells
        .iter()
        .filter(|cell| !cell.is_empty())
        .map(|cell| cell.value())
        .collect();
    u32::try_from(SIZE - distinct.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_solved_board_scores_zero() {
        let board: Board = SOLVED.parse().unwrap();
        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn test_empty_board_scores_maximum() {
        let board = Board::empty();
        assert_eq!(evaluate(&board), 18 * 9);
    }

    #[test]
    fn test_duplicate_costs_both_lines() {
        let mut values = [0_u8; 81];
        for (i, ch) in SOLVED.bytes().enumerate() {
            values[i] = ch - b'0';
        }
        let mut board = Board::from_values(&values, false).unwrap();
        // Overwrite (0, 0) with the value of its row neighbor: row 0 and
        // column 0 each lose one distinct digit.
        board.set(0, 0, board.value(0, 1));
        assert_eq!(evaluate(&board), 2);
    }

    #[test]
    fn test_missing_digits_bound() {
        let mut values = [0_u8; 81];
        for (i, ch) in SOLVED.bytes().enumerate() {
            values[i] = ch - b'0';
        }
        // Empty out row 4: it misses all nine digits.
        for col in 0..9 {
            values[4 * 9 + col] = 0;
        }
        let board = Board::from_values(&values, false).unwrap();
        assert!(evaluate(&board) >= 9);
    }
}
