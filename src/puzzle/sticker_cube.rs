use once_cell::sync::Lazy;

use crate::groups::{Permutation, A4};

use super::Twist;

/// Maps the slots holding a piece's Z-axis and W-axis stickers to the A4
/// orientation element of the piece. Slots on the X and Y axes carry no
/// orientation information of their own.
static A4_FROM_ZW_SLOTS: Lazy<[[A4; 4]; 4]> = Lazy::new(|| {
    use strum::IntoEnumIterator;
    let mut table = [[A4::E; 4]; 4];

    for element in A4::iter() {
        let rep = Permutation::from(element).into_inner();
        let z_slot = rep.iter().position(|&axis| axis == 2).unwrap();
        let w_slot = rep.iter().position(|&axis| axis == 3).unwrap();
        table[z_slot][w_slot] = element;
    }

    table
});

/// The sticker-level cube state: for each of the 16 pieces, the signed axis
/// labels of its stickers, indexed by the axis each sticker currently lies
/// on. Capable of computing any twist, including whole-puzzle rotations and
/// twists of negative layers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StickerCube {
    pieces: [[i8; 4]; 16],
}

impl Default for StickerCube {
    fn default() -> Self {
        StickerCube::solved()
    }
}

/// The sign of axis `j` in the solved location of piece `i`
const fn solved_sign(piece: usize, axis: usize) -> i8 {
    if piece >> axis & 1 == 0 {
        1
    } else {
        -1
    }
}

impl StickerCube {
    /// The solved state: piece 0 in the all-positive corner through piece 15
    /// in the all-negative corner
    pub const fn solved() -> Self {
        let mut pieces = [[0_i8; 4]; 16];
        let mut i = 0;
        while i < 16 {
            let mut j = 0;
            while j < 4 {
                pieces[i][j] = (j as i8 + 1) * solved_sign(i, j);
                j += 1;
            }
            i += 1;
        }
        StickerCube { pieces }
    }

    /// The index of the location a piece vector currently occupies
    fn location_index(vector: [i8; 4]) -> usize {
        let mut index = 0;
        for (axis, &label) in vector.iter().enumerate() {
            if label < 0 {
                index |= 1 << axis;
            }
        }
        index
    }

    /// Applies the twist to every piece on its side of the twist axis
    pub fn twist(mut self, twist: Twist) -> Self {
        let matrix = twist.rotation_matrix();

        for piece in &mut self.pieces {
            // the piece is on the twisted layer when its coordinate along
            // the twist axis matches the side (side 0 grabs both layers)
            if piece[twist.axis.as_usize()] * twist.side >= 0 {
                let mut rotated = [0_i8; 4];
                for (i, row) in matrix.iter().enumerate() {
                    rotated[i] = (0..4).map(|j| row[j] * piece[j]).sum();
                }
                *piece = rotated;
            }
        }

        self
    }

    /// Applies a sequence of twists
    pub fn twists(mut self, twists: impl IntoIterator<Item = Twist>) -> Self {
        for twist in twists {
            self = self.twist(twist);
        }
        self
    }

    /// Returns whether the cube is solved in any whole-puzzle rotation
    pub fn is_solved(&self) -> bool {
        self.reposition() == StickerCube::solved()
    }

    /// Re-bases the state so that whichever piece currently occupies the
    /// all-negative corner becomes the reference piece (piece 15, solved).
    /// The cube state itself is unchanged up to a whole-puzzle rotation and
    /// a relabeling of the axes.
    pub fn reposition(&self) -> Self {
        let reference_index = self
            .pieces
            .iter()
            .position(|piece| piece.iter().all(|&label| label < 0))
            .unwrap();
        let reference = self.pieces[reference_index];

        // relabeling that takes the reference piece's stickers to their
        // solved axes
        let mut axis_map = [0_usize; 4];
        for (axis, &label) in reference.iter().enumerate() {
            axis_map[label.unsigned_abs() as usize - 1] = axis;
        }

        // resticker every piece through the relabeling
        let mut relabeled = [[0_i8; 4]; 16];
        for (i, piece) in self.pieces.iter().enumerate() {
            for (j, &label) in piece.iter().enumerate() {
                relabeled[i][j] =
                    label.signum() * (axis_map[label.unsigned_abs() as usize - 1] as i8 + 1);
            }
        }

        // rename the pieces to match the relabeled solved state
        let mut pieces = [[0_i8; 4]; 16];
        for old in 0..16 {
            let mut new_index = 0;
            for (k, &axis) in axis_map.iter().enumerate() {
                if (old >> k & 1) == (reference_index >> k & 1) {
                    new_index |= 1 << axis;
                }
            }
            pieces[new_index] = relabeled[old];
        }

        StickerCube { pieces }
    }

    /// The piece occupying each of the first 15 locations, in "is replaced
    /// by" form. Only meaningful on a repositioned state.
    pub(crate) fn permutation_list(&self) -> [u8; 15] {
        let mut permutation = [0_u8; 15];
        for piece in 0..15 {
            permutation[Self::location_index(self.pieces[piece])] = piece as u8;
        }
        permutation
    }

    /// The A4 orientation of the piece in each of the first 15 locations.
    /// Only meaningful on a repositioned state.
    pub(crate) fn orientation_list(&self) -> [A4; 15] {
        let permutation = self.permutation_list();

        let mut orientations = [A4::E; 15];
        for (slot, orientation) in orientations.iter_mut().enumerate() {
            let piece = self.pieces[permutation[slot] as usize];

            // which original axis each slot's sticker came from
            let mut reduced = [0_usize; 4];
            for (axis, &label) in piece.iter().enumerate() {
                reduced[axis] = label.unsigned_abs() as usize - 1;
            }

            // moves that fix orientation swap the X and Y stickers of pieces
            // at odd locations
            let negatives = piece.iter().filter(|&&label| label < 0).count();
            if negatives % 2 == 1 {
                reduced.swap(0, 1);
            }

            let z_slot = reduced.iter().position(|&axis| axis == 2).unwrap();
            let w_slot = reduced.iter().position(|&axis| axis == 3).unwrap();
            *orientation = A4_FROM_ZW_SLOTS[z_slot][w_slot];
        }
        orientations
    }

    /// Builds the cube with the piece `permutation[slot]` in each slot,
    /// oriented by `orientation[slot]`
    pub(crate) fn from_lists(permutation: [u8; 15], orientation: [A4; 15]) -> Self {
        let mut pieces = [[0_i8; 4]; 16];
        pieces[15] = StickerCube::solved().pieces[15];

        for slot in 0..15 {
            let mut reduced = Permutation::from(orientation[slot]).into_inner();

            // the arrangement normalized by the current location's parity
            // has the parity of the piece's home location; pieces from odd
            // corners carry their X and Y stickers exchanged relative to the
            // even A4 representative
            let home = permutation[slot] as usize;
            if home.count_ones() % 2 == 1 {
                let x_slot = reduced.iter().position(|&axis| axis == 0).unwrap();
                let y_slot = reduced.iter().position(|&axis| axis == 1).unwrap();
                reduced.swap(x_slot, y_slot);
            }

            if slot.count_ones() % 2 == 1 {
                reduced.swap(0, 1);
            }

            let mut vector = [0_i8; 4];
            for (axis, entry) in vector.iter_mut().enumerate() {
                *entry = solved_sign(slot, axis) * (reduced[axis] as i8 + 1);
            }
            pieces[permutation[slot] as usize] = vector;
        }

        StickerCube { pieces }
    }
}
