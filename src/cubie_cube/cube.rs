use crate::groups::A4;
use crate::puzzle::StickerCube;
use crate::tables::moves::{a4_move, perm_move};

use super::*;

/// Total number of reachable 2^4 cube states
pub const N_CUBE_STATES: u128 = (N_I_COORD_STATES as u128 / 2)
    * (N_O_COORD_STATES as u128)
    * (N_IO_COORD_STATES as u128)
    * (N_C3_COORD_STATES as u128)
    * (N_K4_COORD_STATES as u128);

/// A cube representation for computing moves quickly, restricted to states
/// that keep the reference piece fixed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CubieCube {
    pub orientation: Orientation<A4>,
    pub permutation: Permutation,
}

impl From<StickerCube> for CubieCube {
    fn from(cube: StickerCube) -> Self {
        let repositioned = cube.reposition();
        CubieCube {
            orientation: Orientation::from_array(repositioned.orientation_list()),
            permutation: Permutation(repositioned.permutation_list()),
        }
    }
}

impl From<CubieCube> for StickerCube {
    fn from(cube: CubieCube) -> Self {
        StickerCube::from_lists(
            cube.permutation.into_inner(),
            cube.orientation.into_inner(),
        )
    }
}

impl CubieCube {
    /// Returns the solved state
    pub fn solved() -> CubieCube {
        CubieCube::default()
    }

    pub fn is_solved(&self) -> bool {
        *self == CubieCube::solved()
    }

    /// Applies the given move to the cubiecube
    pub fn apply_move(self, m: Move) -> CubieCube {
        CubieCube {
            orientation: self
                .orientation
                .permute(perm_move(m))
                .apply_orientation(a4_move(m)),
            permutation: self.permutation.permute(perm_move(m)),
        }
    }

    /// Applies the moves to the cubiecube
    pub fn apply_moves(self, moves: impl IntoIterator<Item = Move>) -> CubieCube {
        let mut result = self;
        for m in moves {
            result = result.apply_move(m);
        }
        result
    }

    /// Composes this cube state with another: the result is this state with
    /// the other's rearrangement applied on top
    pub fn compose(self, other: &CubieCube) -> CubieCube {
        CubieCube {
            orientation: self
                .orientation
                .permute(&other.permutation)
                .apply_orientation(&other.orientation),
            permutation: self.permutation.permute(&other.permutation),
        }
    }

    /// Returns the cube with the given C3 orientation and permutation
    /// coordinates and solved K4 orientation
    pub fn from_coords(c3_coord: u32, io_coord: u16, i_coord: u16, o_coord: u16) -> CubieCube {
        CubieCube {
            orientation: Orientation::from_k4_c3_coords(0, c3_coord),
            permutation: Permutation::from_coords(io_coord, i_coord, o_coord),
        }
    }

    /// Returns the unique index of this cube in the full state space
    pub fn to_index(self) -> u128 {
        let phase3 = self.permutation.o_coord() as u128 * (N_I_COORD_STATES as u128 / 2)
            + (self.permutation.i_coord() as u128) % (N_I_COORD_STATES as u128 / 2);

        let mut index = phase3;
        index = index * N_IO_COORD_STATES as u128 + self.permutation.io_coord() as u128;
        index = index * N_C3_COORD_STATES as u128 + self.orientation.c3_coord() as u128;
        index * N_K4_COORD_STATES as u128 + self.orientation.k4_coord() as u128
    }

    /// Returns the unique cube with the given index. Even permutation parity
    /// is restored by flipping the parity half of the I coordinate when
    /// needed.
    pub fn from_index(index: u128) -> CubieCube {
        debug_assert!(index < N_CUBE_STATES);

        let k4_coord = (index % N_K4_COORD_STATES as u128) as u32;
        let index = index / N_K4_COORD_STATES as u128;

        let c3_coord = (index % N_C3_COORD_STATES as u128) as u32;
        let index = index / N_C3_COORD_STATES as u128;

        let io_coord = (index % N_IO_COORD_STATES as u128) as u16;
        let index = index / N_IO_COORD_STATES as u128;

        let i_coord = (index % (N_I_COORD_STATES as u128 / 2)) as u16;
        let o_coord = (index / (N_I_COORD_STATES as u128 / 2)) as u16;

        // only even permutations are reachable; restore parity by flipping
        // the parity half of the I coordinate
        let mut permutation = Permutation::from_coords(io_coord, i_coord, o_coord);
        if permutation.parity().is_odd() {
            permutation =
                Permutation::from_coords(io_coord, i_coord + N_I_COORD_STATES / 2, o_coord);
        }

        CubieCube {
            orientation: Orientation::from_k4_c3_coords(k4_coord, c3_coord),
            permutation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Axis;
    use crate::puzzle::{Twist, TwistDirection};

    #[test]
    fn solved_sticker_cube_converts_to_solved() {
        assert_eq!(CubieCube::from(StickerCube::solved()), CubieCube::solved());
    }

    #[test]
    fn sticker_cube_roundtrip() {
        let cube = CubieCube::from(
            StickerCube::solved()
                .twist(Twist::new(Axis::W, TwistDirection([1, 0, 0]), 1, 1))
                .twist(Twist::new(Axis::X, TwistDirection([1, 1, 1]), 1, -1))
                .twist(Twist::new(Axis::Y, TwistDirection([0, 1, 1]), 1, 1)),
        );

        assert_eq!(CubieCube::from(StickerCube::from(cube)), cube);
    }

    #[test]
    fn single_twists_agree_with_sticker_cube() {
        for (i, &twist) in CANONICAL_TWISTS.iter().enumerate() {
            let cubiecube = CubieCube::solved().apply_move(Move(i as u8));
            let stickercube = StickerCube::solved().twist(twist);

            assert_eq!(cubiecube, CubieCube::from(stickercube), "{}", twist);
        }
    }

    #[test]
    fn twist_pairs_agree_with_sticker_cube() {
        // exercises the composition convention of apply_move
        let pairs = [(0_usize, 1_usize), (3, 17), (44, 91), (12, 50), (70, 5)];
        for (i, j) in pairs {
            let cubiecube = CubieCube::solved()
                .apply_move(Move(i as u8))
                .apply_move(Move(j as u8));
            let stickercube = StickerCube::solved()
                .twist(CANONICAL_TWISTS[i])
                .twist(CANONICAL_TWISTS[j]);

            assert_eq!(cubiecube, CubieCube::from(stickercube));
        }
    }

    #[test]
    fn compose_agrees_with_apply_move() {
        let state = CubieCube::solved()
            .apply_move(Move(10))
            .apply_move(Move(60));

        for m in [Move(0), Move(25), Move(91)] {
            let as_cube = CubieCube::solved().apply_move(m);
            assert_eq!(state.compose(&as_cube), state.apply_move(m));
        }
    }

    #[test]
    fn index_roundtrip() {
        for i in 0..100_u128 {
            let index = i * 33_500_489_927_290_203_486_927_204 + 17;
            let cube = CubieCube::from_index(index);

            assert!(cube.permutation.parity().is_even());
            assert_eq!(cube.to_index(), index);
        }
    }

    #[test]
    fn parity_invariants_hold_under_moves() {
        let mut cube = CubieCube::solved();
        for i in 0..92 {
            cube = cube.apply_move(Move((i * 37 % 92) as u8));

            assert!(cube.permutation.parity().is_even());
            let twist_sum: u32 = cube
                .orientation
                .into_inner()
                .iter()
                .map(|&value| value.to_c3() as u32)
                .sum();
            assert_eq!(twist_sum % 3, 0);
        }
    }
}
