mod common;
mod cubie_cube;
mod groups;
mod log;
mod math;
mod node_cube;
mod phases;
mod puzzle;
mod search;
mod solve;
mod tables;

pub use common::{Axis, Parity};
pub use cubie_cube::{
    compose_moves, CubieCube, Move, MoveComposition, Orientation, Permutation, CANONICAL_TWISTS,
    N_CUBE_STATES, N_PHASE1_MOVES, N_PHASE2_MOVES, N_PHASE3_MOVES,
};
pub use groups::{A4, C3, K4};
pub use log::{Log, LogError};
pub use node_cube::{Node, Phase1Node, Phase2Node, Phase3Node};
pub use phases::{Phase, Phase1, Phase2, Phase3, GODS_NUMBER_UPPER_BOUND};
pub use puzzle::{Layer, StickerCube, Twist, TwistDirection, TwistParseError};
pub use solve::{merge_sequences, solve, solve_with_tables, SolutionIter};
pub use tables::moves::generate_move_tables;
pub use tables::prune::{
    generate_pruning_tables, DiskPruningTable, HashMapPruningTable, PruningTable, PruningTables,
};
