//! Cube representation based on a permutation of the 15 movable pieces and
//! an A4 orientation for each piece, with the reference piece fixed.

mod cube;
mod gen_data;
mod move_index;
mod orientation;
mod permutation;

pub use cube::*;
pub use gen_data::*;
pub use move_index::*;
pub use orientation::*;
pub use permutation::*;
