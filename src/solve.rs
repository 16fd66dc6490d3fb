//! The three-phase solver: nested phase searches whose partial solutions
//! are composed with cross-phase move cancellation, yielding a stream of
//! strictly shorter solutions until optimality is proven.

use crate::common::Axis;
use crate::cubie_cube::{compose_moves, CubieCube, Move, MoveComposition};
use crate::node_cube::{Phase1Node, Phase2Node, Phase3Node};
use crate::phases::GODS_NUMBER_UPPER_BOUND;
use crate::search::{phase3_can_solve, PhaseSolutionIter};
use crate::tables::prune::PruningTables;

/// Joins two move sequences, resolving the interaction at the seam
pub fn merge_sequences(mut left: Vec<Move>, right: &[Move]) -> Vec<Move> {
    if let (Some(&last), Some(&first)) = (left.last(), right.first()) {
        match compose_moves(last, first) {
            MoveComposition::Concatenate => left.extend_from_slice(right),
            MoveComposition::Annihilate => {
                left.pop();
                left.extend_from_slice(&right[1..]);
            }
            MoveComposition::Replace(m) => {
                left.pop();
                left.push(m);
                left.extend_from_slice(&right[1..]);
            }
        }
    } else {
        left.extend_from_slice(right);
    }
    left
}

/// Returns whether appending `right` after `left` saves at least one move
fn seam_cancels(left: &[Move], right: &[Move]) -> bool {
    match (left.last(), right.first()) {
        (Some(&last), Some(&first)) => {
            compose_moves(last, first) != MoveComposition::Concatenate
        }
        _ => false,
    }
}

/// Solves the cube, yielding solutions of strictly decreasing length until
/// the last one is provably optimal. With `max_len`, only solutions of at
/// most that length are reported (and none may exist).
pub fn solve(cube: impl Into<CubieCube>, max_len: Option<usize>) -> SolutionIter<'static> {
    solve_with_tables(cube, max_len, PruningTables::shared())
}

/// Like [`solve`], but reading from caller-provided pruning tables
pub fn solve_with_tables<'a>(
    cube: impl Into<CubieCube>,
    max_len: Option<usize>,
    tables: PruningTables<'a>,
) -> SolutionIter<'a> {
    let cube = cube.into();

    // the phase searches never yield solutions past the summed phase depth
    // bounds, so the no-limit case starts just above it
    let cap = GODS_NUMBER_UPPER_BOUND as usize + 1;
    let best = max_len.map(|len| len + 1).unwrap_or(cap).min(cap);

    let phase1 = PhaseSolutionIter::new(
        Phase1Node::from(cube),
        Axis::X,
        tables.phase1,
        best.saturating_sub(1),
    );

    SolutionIter {
        tables,
        cube,
        best,
        phase1,
        phase2: None,
        done: false,
    }
}

struct Phase2Search<'a> {
    phase1_solution: Vec<Move>,
    phase2_cube: CubieCube,
    solutions: PhaseSolutionIter<'a, Phase2Node>,
}

/// A lazy stream of ever-shorter solutions
pub struct SolutionIter<'a> {
    tables: PruningTables<'a>,
    cube: CubieCube,
    /// Strictly greater than the length of any solution still to be yielded
    best: usize,
    phase1: PhaseSolutionIter<'a, Phase1Node>,
    phase2: Option<Phase2Search<'a>>,
    done: bool,
}

impl Iterator for SolutionIter<'_> {
    type Item = Vec<Move>;

    fn next(&mut self) -> Option<Vec<Move>> {
        if self.done {
            return None;
        }

        loop {
            if self.phase2.is_none() {
                // advance to the next phase 1 solution; phase 1 solutions
                // come out in non-decreasing length, so once they reach the
                // shortest known solution nothing can improve and the last
                // yield was optimal
                self.phase1.set_max_len(self.best.saturating_sub(1));
                let phase1_solution = match self.phase1.next() {
                    Some(solution) => solution,
                    None => {
                        self.done = true;
                        return None;
                    }
                };

                let phase2_cube = self.cube.apply_moves(phase1_solution.iter().copied());
                let last_axis = phase1_solution
                    .last()
                    .map(Move::axis)
                    .unwrap_or_default();

                let solutions = PhaseSolutionIter::new(
                    Phase2Node::from(phase2_cube),
                    last_axis,
                    self.tables.phase2,
                    self.best.saturating_sub(phase1_solution.len()),
                );

                self.phase2 = Some(Phase2Search {
                    phase1_solution,
                    phase2_cube,
                    solutions,
                });
            }

            let search = self.phase2.as_mut().unwrap();
            search
                .solutions
                .set_max_len(self.best.saturating_sub(search.phase1_solution.len()));

            let phase2_solution = match search.solutions.next() {
                Some(solution) => solution,
                None => {
                    self.phase2 = None;
                    continue;
                }
            };

            let cancelled = seam_cancels(&search.phase1_solution, &phase2_solution) as usize;
            let len12 = search.phase1_solution.len() + phase2_solution.len() - cancelled;

            // phase 2 solutions have stopped improving; move on to the next
            // phase 1 solution
            if len12 >= self.best {
                self.phase2 = None;
                continue;
            }

            let phase3_cube = search
                .phase2_cube
                .apply_moves(phase2_solution.iter().copied());
            let phase3_node = Phase3Node::from(phase3_cube);

            let last_move = phase2_solution
                .last()
                .or(search.phase1_solution.last())
                .copied();

            let budget = self.best as i64 - len12 as i64 - 1;
            if !phase3_can_solve(phase3_node, budget, last_move, self.tables.phase3) {
                continue;
            }

            let last_axis = last_move.map(|m| m.axis()).unwrap_or_default();
            let phase3_solution =
                PhaseSolutionIter::new(phase3_node, last_axis, self.tables.phase3, usize::MAX)
                    .next()
                    .unwrap();

            let solution = merge_sequences(
                merge_sequences(search.phase1_solution.clone(), &phase2_solution),
                &phase3_solution,
            );

            if solution.len() >= self.best {
                continue;
            }

            self.best = solution.len();
            return Some(solution);
        }
    }
}
