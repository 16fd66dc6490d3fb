use crate::cubie_cube::{
    CubieCube, Move, Orientation, N_C3_COORD_STATES, N_IO_COORD_STATES, N_I_COORD_STATES,
    N_K4_COORD_STATES, N_O_COORD_STATES,
};
use crate::groups::K4;
use crate::phases::{Phase, Phase1, Phase2, Phase3};
use crate::tables::moves::{a4_move, c3_move, i_move, io_move, o_move, perm_move};

/// A coordinate-level cube state that can apply its phase's moves quickly
pub trait Node: Copy + PartialEq + From<CubieCube> {
    const N_STATES: u64;

    type Phase: Phase;

    /// Returns the index of the node in its phase's coordinate space
    fn index(&self) -> u64;

    /// Returns the node with the given index
    fn from_index(index: u64) -> Self;

    /// Applies the given move to the node
    fn apply_move(&self, m: Move) -> Self;

    /// Returns the goal node
    fn goal() -> Self;

    /// Returns whether this node is the goal node
    fn is_goal(&self) -> bool {
        *self == Self::goal()
    }
}

/// A phase 1 node: the K4 orientation of every piece. The move application
/// walks the orientation list through the move-signature tables rather than
/// decoding the packed coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase1Node {
    orientation: Orientation<K4>,
}

impl Node for Phase1Node {
    const N_STATES: u64 = N_K4_COORD_STATES as u64;

    type Phase = Phase1;

    fn index(&self) -> u64 {
        self.orientation.k4_coord() as u64
    }

    fn from_index(index: u64) -> Self {
        Phase1Node {
            orientation: Orientation::from_k4_coord(index as u32),
        }
    }

    fn apply_move(&self, m: Move) -> Self {
        Phase1Node {
            orientation: self
                .orientation
                .permute(perm_move(m))
                .apply_orientation(a4_move(m)),
        }
    }

    fn goal() -> Self {
        Phase1Node {
            orientation: Orientation::solved(),
        }
    }
}

impl From<CubieCube> for Phase1Node {
    fn from(cube: CubieCube) -> Self {
        Phase1Node {
            orientation: cube.orientation.to_k4(),
        }
    }
}

/// A phase 2 node: the C3 orientation coordinate and the IO separation
/// coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase2Node {
    pub c3_coord: u32,
    pub io_coord: u16,
}

impl Node for Phase2Node {
    const N_STATES: u64 = N_C3_COORD_STATES as u64 * N_IO_COORD_STATES as u64;

    type Phase = Phase2;

    fn index(&self) -> u64 {
        self.io_coord as u64 * N_C3_COORD_STATES as u64 + self.c3_coord as u64
    }

    fn from_index(index: u64) -> Self {
        Phase2Node {
            c3_coord: (index % N_C3_COORD_STATES as u64) as u32,
            io_coord: (index / N_C3_COORD_STATES as u64) as u16,
        }
    }

    fn apply_move(&self, m: Move) -> Self {
        Phase2Node {
            c3_coord: c3_move(m, self.c3_coord),
            io_coord: io_move(m, self.io_coord),
        }
    }

    fn goal() -> Self {
        Phase2Node {
            c3_coord: 0,
            io_coord: 0,
        }
    }
}

impl From<CubieCube> for Phase2Node {
    fn from(cube: CubieCube) -> Self {
        Phase2Node {
            c3_coord: cube.orientation.c3_coord(),
            io_coord: cube.permutation.io_coord(),
        }
    }
}

/// A phase 3 node: the inner and outer permutation coordinates. The index
/// space is collapsed to half of the I range because the parities of the
/// two octets are linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Phase3Node {
    pub i_coord: u16,
    pub o_coord: u16,
}

impl Node for Phase3Node {
    const N_STATES: u64 = N_I_COORD_STATES as u64 * N_O_COORD_STATES as u64 / 2;

    type Phase = Phase3;

    fn index(&self) -> u64 {
        self.o_coord as u64 * (N_I_COORD_STATES / 2) as u64
            + (self.i_coord % (N_I_COORD_STATES / 2)) as u64
    }

    fn from_index(index: u64) -> Self {
        let o_coord = (index / (N_I_COORD_STATES / 2) as u64) as u16;
        let mut i_coord = (index % (N_I_COORD_STATES / 2) as u64) as u16;

        // an odd outer septet forces an odd inner octet
        if o_coord >= N_O_COORD_STATES / 2 {
            i_coord += N_I_COORD_STATES / 2;
        }

        Phase3Node { i_coord, o_coord }
    }

    fn apply_move(&self, m: Move) -> Self {
        Phase3Node {
            i_coord: i_move(m, self.i_coord),
            o_coord: o_move(m, self.o_coord),
        }
    }

    fn goal() -> Self {
        Phase3Node {
            i_coord: 0,
            o_coord: 0,
        }
    }
}

impl From<CubieCube> for Phase3Node {
    fn from(cube: CubieCube) -> Self {
        Phase3Node {
            i_coord: cube.permutation.i_coord(),
            o_coord: cube.permutation.o_coord(),
        }
    }
}
