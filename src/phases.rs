//! The compile-time configuration of the three solver phases: move sets,
//! pruning depths, depth bounds, table filenames, and the axis-grouped move
//! orderings used by the searches.

use std::marker::PhantomData;

use once_cell::sync::Lazy;

use crate::common::Axis;
use crate::cubie_cube::{
    Move, MOVE_AXIS, N_PHASE1_MOVES, N_PHASE2_MOVES, N_PHASE3_MOVES,
};
use crate::node_cube::{Node, Phase1Node, Phase2Node, Phase3Node};

/// Upper bound on the 2^4 God's number reachable by the three-phase solver
pub const GODS_NUMBER_UPPER_BOUND: u32 =
    (Phase1::MAX_DEPTH + Phase2::MAX_DEPTH + Phase3::MAX_DEPTH) as u32;

pub trait Phase {
    /// Number of allowed moves in this phase
    const N_MOVES: usize;
    /// God's number for this phase's subproblem
    const MAX_DEPTH: u8;
    /// Depth to which the pruning table is exact
    const PRUNING_DEPTH: u8;
    /// On-disk name of the pruning table
    const PRUNING_TABLE_FILENAME: &'static str;
    /// Node type searched in this phase
    type Node: Node;

    /// The phase's moves on the given axis, contiguously
    fn axis_moves(axis: Axis) -> &'static [Move];
}

fn gen_axis_moves(n_moves: usize) -> [Vec<Move>; 4] {
    let mut groups: [Vec<Move>; 4] = Default::default();
    for i in 0..n_moves {
        groups[MOVE_AXIS[i].as_usize()].push(Move(i as u8));
    }
    groups
}

static PHASE1_AXIS_MOVES: Lazy<[Vec<Move>; 4]> = Lazy::new(|| gen_axis_moves(N_PHASE1_MOVES));
static PHASE2_AXIS_MOVES: Lazy<[Vec<Move>; 4]> = Lazy::new(|| gen_axis_moves(N_PHASE2_MOVES));
static PHASE3_AXIS_MOVES: Lazy<[Vec<Move>; 4]> = Lazy::new(|| gen_axis_moves(N_PHASE3_MOVES));

pub struct Phase1 {}

impl Phase for Phase1 {
    const N_MOVES: usize = N_PHASE1_MOVES;
    const MAX_DEPTH: u8 = 8;
    const PRUNING_DEPTH: u8 = 6;
    const PRUNING_TABLE_FILENAME: &'static str = "phase1.prun";
    type Node = Phase1Node;

    fn axis_moves(axis: Axis) -> &'static [Move] {
        &PHASE1_AXIS_MOVES[axis.as_usize()]
    }
}

pub struct Phase2 {}

impl Phase for Phase2 {
    const N_MOVES: usize = N_PHASE2_MOVES;
    const MAX_DEPTH: u8 = 10;
    const PRUNING_DEPTH: u8 = 7;
    const PRUNING_TABLE_FILENAME: &'static str = "phase2.prun";
    type Node = Phase2Node;

    fn axis_moves(axis: Axis) -> &'static [Move] {
        &PHASE2_AXIS_MOVES[axis.as_usize()]
    }
}

pub struct Phase3 {}

impl Phase for Phase3 {
    const N_MOVES: usize = N_PHASE3_MOVES;
    const MAX_DEPTH: u8 = 21;
    const PRUNING_DEPTH: u8 = Self::MAX_DEPTH;
    const PRUNING_TABLE_FILENAME: &'static str = "phase3.prun";
    type Node = Phase3Node;

    fn axis_moves(axis: Axis) -> &'static [Move] {
        &PHASE3_AXIS_MOVES[axis.as_usize()]
    }
}

/// Iterates a phase's moves grouped by axis, in cyclic axis order starting
/// from `start_axis`, skipping the `exclude` axis group entirely.
///
/// The searches and the pruning-table sweeps rely on this ordering: starting
/// at the axis after the previous move and excluding the previous move's own
/// axis visits exactly the non-redundant successors, while starting at the
/// previous phase's last axis with nothing excluded tries the cancelling
/// continuations first.
pub(crate) struct MoveCursor<P: Phase> {
    start_axis: Axis,
    exclude: Option<Axis>,
    group: u8,
    index: usize,
    _phase: PhantomData<P>,
}

impl<P: Phase> MoveCursor<P> {
    pub fn new(start_axis: Axis, exclude: Option<Axis>) -> Self {
        MoveCursor {
            start_axis,
            exclude,
            group: 0,
            index: 0,
            _phase: PhantomData,
        }
    }
}

impl<P: Phase> Iterator for MoveCursor<P> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        loop {
            if self.group == 4 {
                return None;
            }

            let mut axis = self.start_axis;
            for _ in 0..self.group {
                axis = axis.next();
            }

            if Some(axis) == self.exclude {
                self.group += 1;
                self.index = 0;
                continue;
            }

            let moves = P::axis_moves(axis);
            if self.index < moves.len() {
                self.index += 1;
                return Some(moves[self.index - 1]);
            }

            self.group += 1;
            self.index = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_moves_cover_each_phase() {
        use strum::IntoEnumIterator;

        let counts: usize = Axis::iter().map(|a| Phase1::axis_moves(a).len()).sum();
        assert_eq!(counts, N_PHASE1_MOVES);
        let counts: usize = Axis::iter().map(|a| Phase2::axis_moves(a).len()).sum();
        assert_eq!(counts, N_PHASE2_MOVES);
        let counts: usize = Axis::iter().map(|a| Phase3::axis_moves(a).len()).sum();
        assert_eq!(counts, N_PHASE3_MOVES);
    }

    #[test]
    fn cursor_starts_at_start_axis_and_skips_excluded() {
        let moves: Vec<Move> = MoveCursor::<Phase3>::new(Axis::Z, Some(Axis::Y)).collect();
        assert_eq!(moves.len(), N_PHASE3_MOVES - Phase3::axis_moves(Axis::Y).len());
        assert!(moves.iter().all(|m| m.axis() != Axis::Y));

        let first_z = Phase3::axis_moves(Axis::Z);
        assert_eq!(&moves[..first_z.len()], first_z);
    }

    #[test]
    fn cursor_without_exclusion_yields_all_moves() {
        let moves: Vec<Move> = MoveCursor::<Phase2>::new(Axis::W, None).collect();
        assert_eq!(moves.len(), N_PHASE2_MOVES);
    }
}
