//! The shared backtracking state machine.
//!
//! All three strategies run the same loop: the committed prefix of the
//! assignment order lives on a frame stack, the current position is the stack
//! depth, and backtracking pops a frame, undoes its assignment, and resumes
//! the popped cell from one past its last accepted value. The strategies
//! differ only in candidate pruning and in how the assignment order evolves.

use gridlock_core::{
    Board, DigitSet,
    board::SIZE,
};
use log::{debug, trace};

use crate::domain::{DomainStore, Propagation};

/// Selects the candidate pruning and assignment order of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Chronological backtracking: static candidate set 1-9, row-major order.
    Chronological,
    /// Forward checking: live pruned domains, row-major order.
    ForwardChecking,
    /// Forward checking with the most-constrained-variable ordering.
    MostConstrained,
}

impl Strategy {
    /// All strategies, in increasing order of sophistication.
    pub const ALL: [Self; 3] = [
        Self::Chronological,
        Self::ForwardChecking,
        Self::MostConstrained,
    ];

    /// Returns a short human-readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Chronological => "cbt",
            Self::ForwardChecking => "fc",
            Self::MostConstrained => "mcv",
        }
    }

    fn uses_domains(self) -> bool {
        self != Self::Chronological
    }
}

/// The outcome of a backtracking solve.
///
/// UNSAT is a distinct variant, never a board value that merely looks empty
/// or invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// A completed board and the number of value-assignment attempts it
    /// took, counting attempts that were later undone.
    Solved {
        /// The solved board.
        board: Board,
        /// Total value-assignment attempts.
        iterations: u64,
    },
    /// The search space was exhausted without a completion.
    Unsat,
}

impl Solution {
    /// Returns the solved board and iteration count, or `None` for UNSAT.
    #[must_use]
    pub fn solved(self) -> Option<(Board, u64)> {
        match self {
            Self::Solved { board, iterations } => Some((board, iterations)),
            Self::Unsat => None,
        }
    }

    /// Returns `true` for the UNSAT outcome.
    #[must_use]
    pub fn is_unsat(&self) -> bool {
        matches!(self, Self::Unsat)
    }
}

/// One committed assignment: the cell, the accepted value, and (FC/MCV) the
/// propagation to undo on backtrack.
struct Frame {
    cell: usize,
    value: u8,
    record: Option<Propagation>,
}

fn position(cell: usize) -> (usize, usize) {
    (cell / SIZE, cell % SIZE)
}

/// Solves `board` with the given strategy.
///
/// The input board is not modified; the result is a fresh board. Givens whose
/// constraints already conflict (for example two identical fixed digits in
/// one row) yield [`Solution::Unsat`] without searching.
#[must_use]
pub fn solve(board: &Board, strategy: Strategy) -> Solution {
    let mut board = board.clone();
    debug!(
        "starting {} solve, {} empty cells",
        strategy.name(),
        board.empty_count()
    );
    if !board.is_valid() {
        debug!("givens conflict, returning unsat");
        return Solution::Unsat;
    }

    let mut domains = DomainStore::new(&board);
    if strategy.uses_domains() {
        domains.prune_givens(&board);
    }

    // Assignment order over the originally-empty cells. The initial row-major
    // sequence doubles as the MCV tie-break rank, since it is ascending by
    // cell index.
    let mut order: Vec<usize> = board
        .empty_positions()
        .map(|(row, col)| row * SIZE + col)
        .collect();
    if strategy == Strategy::MostConstrained {
        sort_suffix(&mut order, 0, &domains);
    }

    let mut trail: Vec<Frame> = Vec::with_capacity(order.len());
    let mut iterations: u64 = 0;
    // Candidates at the current position must exceed this floor; nonzero only
    // when re-trying a cell after a backtrack.
    let mut resume_after: u8 = 0;

    loop {
        let pos = trail.len();
        if pos == order.len() {
            debug!("{} solved in {iterations} iterations", strategy.name());
            return Solution::Solved { board, iterations };
        }
        let cell = order[pos];
        match try_cell(
            &mut board,
            &mut domains,
            strategy,
            cell,
            resume_after,
            &mut iterations,
        ) {
            Some(frame) => {
                trail.push(frame);
                resume_after = 0;
            }
            None => {
                let Some(frame) = trail.pop() else {
                    debug!("{} exhausted after {iterations} iterations", strategy.name());
                    return Solution::Unsat;
                };
                if let Some(record) = &frame.record {
                    domains.undo_propagate(record);
                }
                let (row, col) = position(frame.cell);
                board.clear(row, col);
                resume_after = frame.value;
                trace!("backtracking to ({row}, {col}), resuming past {}", frame.value);
                if strategy == Strategy::MostConstrained {
                    // Control returned to the committed prefix; re-sort the
                    // uncommitted suffix by live domain size. The re-tried
                    // cell keeps its slot.
                    sort_suffix(&mut order, trail.len() + 1, &domains);
                }
            }
        }
    }
}

/// Tries the candidates above `resume_after` at `cell` in ascending order.
/// Returns the committed frame on acceptance; on exhaustion the cell is left
/// cleared.
fn try_cell(
    board: &mut Board,
    domains: &mut DomainStore,
    strategy: Strategy,
    cell: usize,
    resume_after: u8,
    iterations: &mut u64,
) -> Option<Frame> {
    let (row, col) = position(cell);
    let candidates = if strategy.uses_domains() {
        domains.candidates(row, col)
    } else {
        DigitSet::FULL
    };
    for value in candidates.iter().filter(|&v| v > resume_after) {
        board.set(row, col, value);
        *iterations += 1;
        if strategy.uses_domains() {
            let record = domains.propagate(board, row, col);
            if board.is_consistent(row, col) && !domains.any_domain_empty(board) {
                return Some(Frame {
                    cell,
                    value,
                    record: Some(record),
                });
            }
            domains.undo_propagate(&record);
        } else if board.is_consistent(row, col) {
            return Some(Frame {
                cell,
                value,
                record: None,
            });
        }
    }
    board.clear(row, col);
    None
}

/// Sorts `order[from..]` ascending by current domain size, ties broken by the
/// original row-major rank (the cell index).
fn sort_suffix(order: &mut [usize], from: usize, domains: &DomainStore) {
    if from >= order.len() {
        return;
    }
    order[from..].sort_by_key(|&cell| {
        let (row, col) = position(cell);
        (domains.candidates(row, col).len(), cell)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const SAMPLE_SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    const PUZZLES: [&str; 5] = [
        "003020600900305001001806400008102900700000008006708200002609500800203009005010300",
        "200080300060070084030500209000105408000000000402706000301007040720040060004010003",
        "000000907000420180000705026100904000050000040000507009920108000034059000507000000",
        "030050040008010500460000012070502080000603000040109030250000098001020600080060020",
        "020810740700003100090002805009040087400208003160030200302700060005600008076051090",
    ];

    fn solved(input: &str, strategy: Strategy) -> (Board, u64) {
        let board: Board = input.parse().unwrap();
        solve(&board, strategy)
            .solved()
            .unwrap_or_else(|| panic!("{} should solve {input}", strategy.name()))
    }

    #[test]
    fn test_already_solved_grid_takes_zero_iterations() {
        for strategy in Strategy::ALL {
            let (board, iterations) = solved(SAMPLE_SOLVED, strategy);
            assert_eq!(iterations, 0, "{}", strategy.name());
            assert_eq!(board.digit_line(), SAMPLE_SOLVED);
        }
    }

    #[test]
    fn test_cbt_solves_the_sample_puzzle() {
        let (board, iterations) = solved(SAMPLE, Strategy::Chronological);
        assert!(iterations > 0);
        assert!(board.is_valid());
        assert_eq!(board.digit_line(), SAMPLE_SOLVED);
    }

    #[test]
    fn test_all_strategies_solve_the_puzzle_set() {
        for input in PUZZLES {
            let given: Board = input.parse().unwrap();
            for strategy in Strategy::ALL {
                let (board, _) = solved(input, strategy);
                assert!(board.is_valid(), "{} on {input}", strategy.name());
                assert_eq!(board.empty_count(), 0);
                for (row, col) in (0..SIZE).flat_map(|r| (0..SIZE).map(move |c| (r, c))) {
                    if given.is_fixed(row, col) {
                        assert_eq!(board.value(row, col), given.value(row, col));
                        assert!(board.is_fixed(row, col));
                    }
                }
            }
        }
    }

    #[test]
    fn test_ordering_heuristics_reduce_iterations() {
        let mut totals = [0_u64; 3];
        for input in PUZZLES.iter().chain([&SAMPLE]) {
            for (i, strategy) in Strategy::ALL.into_iter().enumerate() {
                totals[i] += solved(input, strategy).1;
            }
        }
        let [cbt, fc, mcv] = totals;
        assert!(fc <= cbt, "fc {fc} > cbt {cbt}");
        assert!(mcv <= fc, "mcv {mcv} > fc {fc}");
    }

    #[test]
    fn test_conflicting_givens_are_unsat() {
        // Two fixed 5s in row 0.
        let mut values = [0_u8; 81];
        values[0] = 5;
        values[8] = 5;
        let board = Board::from_values(&values, true).unwrap();
        for strategy in Strategy::ALL {
            assert!(solve(&board, strategy).is_unsat(), "{}", strategy.name());
        }
    }

    #[test]
    fn test_conflicting_box_givens_are_unsat() {
        let mut values = [0_u8; 81];
        values[0] = 7; // (0, 0)
        values[10] = 7; // (1, 1), same box
        let board = Board::from_values(&values, true).unwrap();
        for strategy in Strategy::ALL {
            assert!(solve(&board, strategy).is_unsat(), "{}", strategy.name());
        }
    }

    #[test]
    fn test_empty_board_is_solvable() {
        for strategy in Strategy::ALL {
            let (board, iterations) = solved(&"0".repeat(81), strategy);
            assert!(board.is_valid());
            assert_eq!(board.empty_count(), 0);
            assert!(iterations >= 81);
        }
    }

    #[test]
    fn test_input_board_is_not_modified() {
        let board: Board = SAMPLE.parse().unwrap();
        let before = board.clone();
        let _ = solve(&board, Strategy::ForwardChecking);
        assert_eq!(board, before);
    }
}
