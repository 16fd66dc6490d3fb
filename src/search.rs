//! Iterative-deepening depth-first search over a phase's coordinate space.
//!
//! The generator-style search of the phases is an explicit iterator: one
//! move cursor per recursion frame, a stack of chosen moves, and a stack of
//! the nodes reached. Solutions come out in non-decreasing length, with all
//! solutions of one length before any of the next.

use crate::common::Axis;
use crate::cubie_cube::{Move, N_PHASE3_MOVES};
use crate::node_cube::{Node, Phase3Node};
use crate::phases::{MoveCursor, Phase};
use crate::tables::prune::PruningTable;

pub(crate) struct PhaseSolutionIter<'a, N: Node> {
    prune: &'a dyn PruningTable<N>,
    start_axis: Axis,
    target_len: usize,
    max_len: usize,
    stack: Vec<Move>,
    nodes: Vec<N>,
    cursors: Vec<MoveCursor<N::Phase>>,
}

impl<'a, N: Node> PhaseSolutionIter<'a, N> {
    /// Creates an iterator over the solutions of `node`, starting the root
    /// frame's move ordering at `start_axis` so that continuations
    /// cancelling into the previous phase are found first. The iterator ends
    /// once solutions would exceed `max_len`.
    pub fn new(
        node: N,
        start_axis: Axis,
        prune: &'a dyn PruningTable<N>,
        max_len: usize,
    ) -> Self {
        PhaseSolutionIter {
            prune,
            start_axis,
            target_len: prune.depth_bound(node) as usize,
            max_len,
            stack: Vec::new(),
            nodes: vec![node],
            cursors: Vec::new(),
        }
    }

    /// Lowers (or raises) the length past which iteration stops
    pub fn set_max_len(&mut self, max_len: usize) {
        self.max_len = max_len;
    }
}

impl<N: Node> Iterator for PhaseSolutionIter<'_, N> {
    type Item = Vec<Move>;

    fn next(&mut self) -> Option<Vec<Move>> {
        loop {
            if self.target_len > self.max_len {
                return None;
            }

            if self.cursors.is_empty() {
                // begin the sweep at the current target length
                if self.target_len == 0 {
                    self.target_len += 1;
                    if self.nodes[0].is_goal() {
                        return Some(Vec::new());
                    }
                    continue;
                }

                if self.prune.depth_bound(self.nodes[0]) as usize > self.target_len {
                    self.target_len += 1;
                    continue;
                }

                self.cursors.push(MoveCursor::new(self.start_axis, None));
            }

            let depth = self.stack.len();
            match self.cursors.last_mut().unwrap().next() {
                Some(m) => {
                    let child = self.nodes[depth].apply_move(m);

                    // not solvable within the remaining moves
                    if depth + 1 + self.prune.depth_bound(child) as usize > self.target_len {
                        continue;
                    }

                    if depth + 1 == self.target_len {
                        if child.is_goal() {
                            let mut solution = self.stack.clone();
                            solution.push(m);
                            return Some(solution);
                        }
                        continue;
                    }

                    self.stack.push(m);
                    self.nodes.push(child);
                    self.cursors
                        .push(MoveCursor::new(m.axis().next(), Some(m.axis())));
                }
                None => {
                    self.cursors.pop();
                    if self.stack.pop().is_some() {
                        self.nodes.pop();
                    } else {
                        // the root frame is exhausted at this length
                        self.target_len += 1;
                    }
                }
            }
        }
    }
}

/// Returns whether the phase 3 node is solvable within `budget` moves,
/// counting a one-move saving when the optimal first move cancels into
/// `last_move` across the phase boundary
pub(crate) fn phase3_can_solve(
    node: Phase3Node,
    budget: i64,
    last_move: Option<Move>,
    prune: &dyn PruningTable<Phase3Node>,
) -> bool {
    if budget < 0 {
        return false;
    }

    let bound = prune.depth_bound(node) as i64;

    // even a cancellation saves only one move
    if bound > budget + 1 {
        return false;
    }

    if bound <= prune.pruning_depth() as i64 {
        // the distance is exact
        if bound <= budget {
            return true;
        }
        match last_move {
            Some(m) => matches_axis_first_move(node, m.axis(), prune),
            None => false,
        }
    } else {
        // only a lower bound is known; expand one move, crediting a seam
        // cancellation on the first
        (0..N_PHASE3_MOVES).map(|i| Move(i as u8)).any(|m| {
            let credit = match last_move {
                Some(last) if last.axis() == m.axis() => 1,
                _ => 0,
            };
            can_solve_within(node.apply_move(m), budget - 1 + credit, prune)
        })
    }
}

/// Returns whether the node's minimal solution has length at most `budget`
fn can_solve_within(node: Phase3Node, budget: i64, prune: &dyn PruningTable<Phase3Node>) -> bool {
    if budget < 0 {
        return false;
    }

    let bound = prune.depth_bound(node) as i64;
    if bound > budget {
        return false;
    }
    if bound <= prune.pruning_depth() as i64 {
        return true;
    }

    (0..N_PHASE3_MOVES)
        .map(|i| Move(i as u8))
        .any(|m| can_solve_within(node.apply_move(m), budget - 1, prune))
}

/// Returns whether some optimal solution of the node begins with a move on
/// the given axis
fn matches_axis_first_move(
    node: Phase3Node,
    axis: Axis,
    prune: &dyn PruningTable<Phase3Node>,
) -> bool {
    let dist = prune.depth_bound(node);

    crate::phases::Phase3::axis_moves(axis)
        .iter()
        .any(|&m| prune.depth_bound(node.apply_move(m)) < dist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubie_cube::{compose_moves, CubieCube, MoveComposition};
    use crate::node_cube::Phase1Node;
    use crate::tables::prune::HashMapPruningTable;

    fn inverse_of(m: Move) -> Move {
        (0..92)
            .map(Move)
            .find(|&j| compose_moves(m, j) == MoveComposition::Annihilate)
            .unwrap()
    }

    #[test]
    fn goal_node_yields_the_empty_solution_first() {
        let table = HashMapPruningTable::<Phase3Node>::generate(2);
        let mut solutions =
            PhaseSolutionIter::new(Phase3Node::goal(), Axis::X, &table, 3);

        assert_eq!(solutions.next(), Some(Vec::new()));
        // every further solution returns to the goal without being empty
        for solution in solutions {
            assert!(!solution.is_empty());
            let end = solution
                .iter()
                .fold(Phase3Node::goal(), |node, &m| node.apply_move(m));
            assert!(end.is_goal());
        }
    }

    #[test]
    fn single_twist_solves_with_its_inverse() {
        let table = HashMapPruningTable::<Phase3Node>::generate(3);

        for i in 0..N_PHASE3_MOVES {
            let m = Move(i as u8);
            let node = Phase3Node::from(CubieCube::solved().apply_move(m));
            let solution = PhaseSolutionIter::new(node, Axis::X, &table, 4)
                .next()
                .unwrap();

            assert_eq!(solution, vec![inverse_of(m)]);
        }
    }

    #[test]
    fn solutions_come_out_in_nondecreasing_length() {
        let table = HashMapPruningTable::<Phase3Node>::generate(3);
        let node = Phase3Node::from(
            CubieCube::solved()
                .apply_move(Move(0))
                .apply_move(Move(7)),
        );

        let mut last_len = 0;
        for solution in PhaseSolutionIter::new(node, Axis::X, &table, 4) {
            assert!(solution.len() >= last_len);
            last_len = solution.len();

            let end = solution
                .iter()
                .fold(node, |node, &m| node.apply_move(m));
            assert!(end.is_goal());
        }
    }

    #[test]
    fn phase1_search_agrees_with_its_table() {
        let table = HashMapPruningTable::<Phase1Node>::generate(2);
        let node = Phase1Node::from(CubieCube::solved().apply_move(Move(50)));

        let mut solutions = PhaseSolutionIter::new(node, Axis::X, &table, 2);
        assert_eq!(solutions.next().unwrap().len(), 1);

        // every solution reaches the goal and lengths never decrease
        let mut last_len = 1;
        for solution in solutions {
            assert!(solution.len() >= last_len);
            last_len = solution.len();

            let end = solution.iter().fold(node, |node, &m| node.apply_move(m));
            assert!(end.is_goal());
        }
    }

    #[test]
    fn can_solve_respects_budgets() {
        let table = HashMapPruningTable::<Phase3Node>::generate(3);

        let m = Move(4);
        let node = Phase3Node::from(CubieCube::solved().apply_move(m));

        assert!(phase3_can_solve(node, 1, None, &table));
        assert!(!phase3_can_solve(node, 0, None, &table));
        // the optimal first move (the inverse) shares its axis with the
        // scrambling move, so one move cancels across the seam
        assert!(phase3_can_solve(node, 0, Some(m), &table));

        assert!(phase3_can_solve(Phase3Node::goal(), 0, None, &table));
        assert!(!phase3_can_solve(Phase3Node::goal(), -1, None, &table));
    }

    #[test]
    #[ignore = "requires the phase 1 pruning table"]
    fn phase1_prune_values_are_exact_below_the_sentinel() {
        use crate::tables::prune::PruningTables;
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let table = PruningTables::shared().phase1;
        let mut rng = StdRng::seed_from_u64(11);

        let mut checked = 0;
        while checked < 10 {
            let node = Phase1Node::from_index(rng.gen_range(0..Phase1Node::N_STATES));
            let bound = table.depth_bound(node);
            if bound > table.pruning_depth() {
                continue;
            }

            let shortest = PhaseSolutionIter::new(node, Axis::X, table, bound as usize)
                .next()
                .unwrap();
            assert_eq!(shortest.len(), bound as usize);
            checked += 1;
        }
    }
}
