//! The iterated local search engine.

use gridlock_core::{
    Board, DigitSet,
    board::{SIZE, box_position},
};
use log::debug;
use rand::{Rng, RngExt, SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg64Mcg;

use crate::{evaluate::evaluate, visited::VisitedStates};

/// The outcome of one [`IteratedLocalSearch::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A neighbor with a score no worse than the current board was taken.
    Moved {
        /// The score of the board after the move.
        score: u32,
    },
    /// The tried box offered no acceptable neighbor and was removed from the
    /// remaining boxes.
    Stuck,
}

/// Iterated local search over box-local swaps.
///
/// The random number source is injected, so runs are reproducible given the
/// same seed and inputs; [`IteratedLocalSearch::from_seed`] picks the crate's
/// default generator.
#[derive(Debug, Clone)]
pub struct IteratedLocalSearch<R> {
    rng: R,
}

impl IteratedLocalSearch<Pcg64Mcg> {
    /// Creates an engine seeded from `seed`.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(Pcg64Mcg::seed_from_u64(seed))
    }
}

impl<R: Rng> IteratedLocalSearch<R> {
    /// Creates an engine driven by `rng`.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Fills every empty cell so that each box becomes a permutation of 1-9:
    /// per box independently, the digits missing from the box are shuffled
    /// and written into its empty cells in box-row-major order.
    ///
    /// All later moves are intra-box swaps, so the boxes stay permutations
    /// for the rest of the search.
    pub fn init_state(&mut self, board: &mut Board) {
        for box_index in 0..SIZE {
            let present: DigitSet = board
                .box_cells(box_index)
                .iter()
                .filter(|cell| !cell.is_empty())
                .map(|cell| cell.value())
                .collect();
            let mut missing: Vec<u8> = present.missing().iter().collect();
            missing.shuffle(&mut self.rng);
            let mut digits = missing.into_iter();
            for slot in 0..SIZE {
                let (row, col) = box_position(box_index, slot);
                if board.cell(row, col).is_empty()
                    && let Some(digit) = digits.next()
                {
                    board.set(row, col, digit);
                }
            }
        }
    }

    /// Examines the neighborhood of one box picked uniformly from
    /// `remaining_boxes`.
    ///
    /// All 36 unordered position pairs of the box are enumerated; pairs
    /// touching a fixed cell and candidates already in `visited` are
    /// discarded. Among the survivors scoring no worse than `current_score`,
    /// the lowest score wins, ties broken by first encounter in enumeration
    /// order. A taken move is recorded in `visited`; a box with no acceptable
    /// neighbor is removed from `remaining_boxes`.
    ///
    /// # Panics
    ///
    /// Panics if `remaining_boxes` is empty.
    pub fn step(
        &mut self,
        board: &mut Board,
        visited: &mut VisitedStates,
        remaining_boxes: &mut Vec<usize>,
        current_score: u32,
    ) -> StepOutcome {
        assert!(!remaining_boxes.is_empty(), "no boxes left to try");
        let pick = self.rng.random_range(0..remaining_boxes.len());
        let box_index = remaining_boxes[pick];

        let mut best: Option<(Board, u32)> = None;
        for a in 0..SIZE {
            for b in (a + 1)..SIZE {
                let (row_a, col_a) = box_position(box_index, a);
                let (row_b, col_b) = box_position(box_index, b);
                if board.is_fixed(row_a, col_a) || board.is_fixed(row_b, col_b) {
                    continue;
                }
                let mut candidate = board.clone();
                candidate.swap_in_box(box_index, a, b);
                if visited.contains(&candidate) {
                    continue;
                }
                let score = evaluate(&candidate);
                // A strictly lower score displaces an earlier pick, an equal
                // one does not.
                if score <= current_score && best.as_ref().is_none_or(|(_, b)| score < *b) {
                    best = Some((candidate, score));
                }
            }
        }

        match best {
            Some((choice, score)) => {
                *board = choice;
                visited.insert(board);
                StepOutcome::Moved { score }
            }
            None => {
                remaining_boxes.swap_remove(pick);
                StepOutcome::Stuck
            }
        }
    }

    /// Applies `distance` random intra-box swaps with no score filter,
    /// purposefully worsening or randomizing the board to escape a local
    /// optimum.
    ///
    /// Boxes with fewer than two non-fixed positions are excluded up front,
    /// so a heavily pre-filled puzzle cannot stall the walk. A board with no
    /// swappable box at all is left unchanged.
    pub fn random_walk(&mut self, board: &mut Board, distance: usize) {
        let swappable: Vec<(usize, Vec<usize>)> = (0..SIZE)
            .filter_map(|box_index| {
                let free: Vec<usize> = (0..SIZE)
                    .filter(|&slot| {
                        let (row, col) = box_position(box_index, slot);
                        !board.is_fixed(row, col)
                    })
                    .collect();
                (free.len() >= 2).then_some((box_index, free))
            })
            .collect();
        if swappable.is_empty() {
            return;
        }
        for _ in 0..distance {
            let (box_index, free) = &swappable[self.rng.random_range(0..swappable.len())];
            let a = self.rng.random_range(0..free.len());
            let mut b = self.rng.random_range(0..free.len() - 1);
            if b >= a {
                b += 1;
            }
            board.swap_in_box(*box_index, free[a], free[b]);
        }
    }

    /// Runs the full iterated local search.
    ///
    /// Hill-climbs with [`IteratedLocalSearch::step`] until the score reaches
    /// 0 or the climb stalls (nine boxes tried without an acceptable
    /// neighbor, or nine consecutive accepted moves without a strictly lower
    /// score); a stall triggers a [`IteratedLocalSearch::random_walk`] of
    /// `walk_distance` swaps and the climb restarts. Every `step` call
    /// consumes one unit of `max_iterations`. The starting board is recorded
    /// in `visited` before the first step.
    ///
    /// Returns the board and the iteration count. An unsolvable input never
    /// reaches score 0 and comes back when the budget is exhausted, as a
    /// best effort with a nonzero score; this is a normal result, not an
    /// error.
    #[must_use]
    pub fn solve(
        &mut self,
        board: Board,
        visited: &mut VisitedStates,
        walk_distance: usize,
        max_iterations: u64,
    ) -> (Board, u64) {
        let mut board = board;
        let mut score = evaluate(&board);
        let mut iterations: u64 = 0;
        // Record the start so the climb cannot cycle back to it.
        visited.insert(&board);
        debug!("starting ils solve, initial score {score}");
        loop {
            let mut remaining_boxes: Vec<usize> = (0..SIZE).collect();
            let mut plateau = 0_u32;
            while !remaining_boxes.is_empty()
                && plateau < 9
                && score != 0
                && iterations < max_iterations
            {
                iterations += 1;
                match self.step(&mut board, visited, &mut remaining_boxes, score) {
                    StepOutcome::Moved { score: new_score } => {
                        if new_score < score {
                            plateau = 0;
                        } else {
                            plateau += 1;
                        }
                        score = new_score;
                        // An acceptable move re-opens the full neighborhood.
                        remaining_boxes = (0..SIZE).collect();
                    }
                    StepOutcome::Stuck => {}
                }
            }
            if score == 0 || iterations >= max_iterations {
                debug!("ils finished at score {score} after {iterations} iterations");
                return (board, iterations);
            }
            debug!("ils stalled at score {score}, random walk of {walk_distance}");
            self.random_walk(&mut board, walk_distance);
            visited.insert(&board);
            score = evaluate(&board);
        }
    }
}
