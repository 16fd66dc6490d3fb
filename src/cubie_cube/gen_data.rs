use once_cell::sync::Lazy;

use crate::common::Axis;
use crate::puzzle::{StickerCube, Twist, TwistDirection};

use super::*;

/// The canonical ordered list of the 92 twists that fix the reference piece.
/// The list is grouped phase 3 first, then the remaining phase 2 twists,
/// then the rest; within each phase block twists are grouped by axis, and
/// within an axis group ordered by twist order (4, 3, 2) then direction.
pub static CANONICAL_TWISTS: Lazy<[Twist; N_PHASE1_MOVES]> = Lazy::new(|| {
    use strum::IntoEnumIterator;

    let mut phase_buckets: [Vec<Twist>; 3] = Default::default();

    for axis in Axis::iter() {
        let mut axis_twists = Vec::new();
        for direction in TwistDirection::iter_unique() {
            for amount in 1..direction.order() {
                axis_twists.push(Twist::new(axis, direction, 1, amount));
            }
        }
        axis_twists.sort_by_key(|twist| (std::cmp::Reverse(twist.order()), twist.direction));

        for twist in axis_twists {
            let cube = CubieCube::from(StickerCube::solved().twist(twist));

            let bucket = if cube.permutation.io_coord() == 0
                && cube.orientation == Orientation::solved()
            {
                0
            } else if cube.orientation.to_k4() == Orientation::solved() {
                1
            } else {
                2
            };
            phase_buckets[bucket].push(twist);
        }
    }

    phase_buckets
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .try_into()
        .unwrap()
});

/// The axis fixed by each canonical twist
pub static MOVE_AXIS: Lazy<[Axis; N_PHASE1_MOVES]> =
    Lazy::new(|| CANONICAL_TWISTS.map(|twist| twist.axis));

/// The composition of every ordered pair of canonical moves. Only moves on
/// the same axis interact; their compositions stay within the axis's layer
/// rotation group and always resolve to a single move or to nothing.
pub static MOVE_COMPOSITION: Lazy<Box<[[MoveComposition; N_PHASE1_MOVES]; N_PHASE1_MOVES]>> =
    Lazy::new(|| {
        let solved = CubieCube::solved();
        let mut table =
            Box::new([[MoveComposition::Concatenate; N_PHASE1_MOVES]; N_PHASE1_MOVES]);

        for i in 0..N_PHASE1_MOVES {
            for j in 0..N_PHASE1_MOVES {
                if MOVE_AXIS[i] != MOVE_AXIS[j] {
                    continue;
                }

                let composed = solved.apply_move(Move(i as u8)).apply_move(Move(j as u8));

                table[i][j] = if composed == solved {
                    MoveComposition::Annihilate
                } else {
                    let k = (0..N_PHASE1_MOVES)
                        .find(|&k| solved.apply_move(Move(k as u8)) == composed)
                        .unwrap();
                    MoveComposition::Replace(Move(k as u8))
                };
            }
        }

        table
    });

/// Looks up the composition of applying `first` then `second`
pub fn compose_moves(first: Move, second: Move) -> MoveComposition {
    MOVE_COMPOSITION[first.as_usize()][second.as_usize()]
}

impl From<Move> for Twist {
    fn from(m: Move) -> Self {
        CANONICAL_TWISTS[m.as_usize()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_twist_count() {
        assert_eq!(CANONICAL_TWISTS.len(), 92);
        // all distinct
        for (i, a) in CANONICAL_TWISTS.iter().enumerate() {
            for b in &CANONICAL_TWISTS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn phase_move_prefixes() {
        let solved = CubieCube::solved();

        for i in 0..N_PHASE1_MOVES {
            let cube = solved.apply_move(Move(i as u8));

            let preserves_phase3 =
                cube.permutation.io_coord() == 0 && cube.orientation == Orientation::solved();
            let preserves_k4 = cube.orientation.to_k4() == Orientation::solved();

            assert_eq!(preserves_phase3, i < N_PHASE3_MOVES);
            assert_eq!(preserves_k4, i < N_PHASE2_MOVES);
        }
    }

    #[test]
    fn axis_groups_are_contiguous_within_phases() {
        for block in [0..N_PHASE3_MOVES, N_PHASE3_MOVES..N_PHASE2_MOVES, N_PHASE2_MOVES..N_PHASE1_MOVES] {
            let axes: Vec<Axis> = block.map(|i| MOVE_AXIS[i]).collect();
            let mut deduped = axes.clone();
            deduped.dedup();
            // each axis appears in at most one contiguous run
            let mut sorted = deduped.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(deduped.len(), sorted.len());
        }
    }

    #[test]
    fn every_move_has_a_unique_inverse() {
        for i in 0..N_PHASE1_MOVES {
            let inverses = (0..N_PHASE1_MOVES)
                .filter(|&j| compose_moves(Move(i as u8), Move(j as u8)) == MoveComposition::Annihilate)
                .count();
            assert_eq!(inverses, 1);
        }
    }

    #[test]
    fn inverse_composition_restores_state() {
        let state = CubieCube::solved().apply_moves([Move(7), Move(55), Move(23)]);

        for i in 0..N_PHASE1_MOVES {
            let m = Move(i as u8);
            let inverse = (0..N_PHASE1_MOVES)
                .map(|j| Move(j as u8))
                .find(|&j| compose_moves(m, j) == MoveComposition::Annihilate)
                .unwrap();

            assert_eq!(state.apply_move(m).apply_move(inverse), state);
        }
    }

    #[test]
    fn replacements_are_equivalent_to_their_pairs() {
        let solved = CubieCube::solved();

        for i in 0..N_PHASE1_MOVES {
            for j in 0..N_PHASE1_MOVES {
                if let MoveComposition::Replace(k) = compose_moves(Move(i as u8), Move(j as u8)) {
                    assert_eq!(
                        solved.apply_move(Move(i as u8)).apply_move(Move(j as u8)),
                        solved.apply_move(k)
                    );
                }
            }
        }
    }

    #[test]
    fn cross_axis_moves_concatenate() {
        for i in 0..N_PHASE1_MOVES {
            for j in 0..N_PHASE1_MOVES {
                if MOVE_AXIS[i] != MOVE_AXIS[j] {
                    assert_eq!(
                        compose_moves(Move(i as u8), Move(j as u8)),
                        MoveComposition::Concatenate
                    );
                }
            }
        }
    }
}
