//! The six move tables: the permutation and A4 orientation signatures of
//! each canonical twist, and the transitions of each coordinate under each
//! phase's move set. Tables are addressed as `table[move][coord]`.

use num_enum::TryFromPrimitive;
use once_cell::sync::Lazy;
use rayon::prelude::*;

use crate::cubie_cube::{
    CubieCube, Move, Orientation, Permutation, CANONICAL_TWISTS, N_C3_COORD_STATES,
    N_IO_COORD_STATES, N_I_COORD_STATES, N_O_COORD_STATES, N_PHASE1_MOVES, N_PHASE2_MOVES,
    N_PHASE3_MOVES,
};
use crate::groups::A4;
use crate::puzzle::StickerCube;

use super::{load_or_generate_small, DiskTable};

pub(crate) const PERM_LIST_MOVE_TABLE_FILENAME: &str = "perm_list.move";
pub(crate) const A4_LIST_MOVE_TABLE_FILENAME: &str = "A4_list.move";
pub(crate) const C3_MOVE_TABLE_FILENAME: &str = "C3.move";
pub(crate) const IO_MOVE_TABLE_FILENAME: &str = "IO.move";
pub(crate) const I_MOVE_TABLE_FILENAME: &str = "I.move";
pub(crate) const O_MOVE_TABLE_FILENAME: &str = "O.move";

/// The permutation signature of each canonical twist
static PERM_MOVE_TABLE: Lazy<Box<[Permutation; N_PHASE1_MOVES]>> = Lazy::new(|| {
    let bytes = load_or_generate_small(PERM_LIST_MOVE_TABLE_FILENAME, N_PHASE1_MOVES * 15, || {
        CANONICAL_TWISTS
            .iter()
            .flat_map(|&twist| {
                StickerCube::solved()
                    .twist(twist)
                    .reposition()
                    .permutation_list()
            })
            .collect()
    });

    bytes
        .chunks_exact(15)
        .map(|row| Permutation(row.try_into().unwrap()))
        .collect::<Vec<_>>()
        .try_into()
        .unwrap()
});

/// The A4 orientation signature of each canonical twist
static A4_MOVE_TABLE: Lazy<Box<[Orientation<A4>; N_PHASE1_MOVES]>> = Lazy::new(|| {
    let bytes = load_or_generate_small(A4_LIST_MOVE_TABLE_FILENAME, N_PHASE1_MOVES * 15, || {
        CANONICAL_TWISTS
            .iter()
            .flat_map(|&twist| {
                StickerCube::solved()
                    .twist(twist)
                    .reposition()
                    .orientation_list()
                    .map(|element| element as u8)
            })
            .collect()
    });

    bytes
        .chunks_exact(15)
        .map(|row| {
            let mut state = [A4::E; 15];
            for (entry, &byte) in state.iter_mut().zip(row) {
                *entry = A4::try_from_primitive(byte).expect("corrupt A4 move table");
            }
            Orientation::from_array(state)
        })
        .collect::<Vec<_>>()
        .try_into()
        .unwrap()
});

pub(crate) fn perm_move(m: Move) -> &'static Permutation {
    &PERM_MOVE_TABLE[m.as_usize()]
}

pub(crate) fn a4_move(m: Move) -> &'static Orientation<A4> {
    &A4_MOVE_TABLE[m.as_usize()]
}

/// Fills one `table[move][coord]` row per rayon job, materializing the cube
/// with each coordinate value, applying the move, and projecting back
fn fill_move_table<T: bytemuck::Pod + Send>(
    table: &mut [T],
    filename: &str,
    n_coords: usize,
    entry: impl Fn(Move, usize) -> T + Sync,
) {
    let progress = indicatif::ProgressBar::new((table.len() / n_coords) as u64)
        .with_message(format!("Generating {}", filename));
    progress.set_style(
        indicatif::ProgressStyle::with_template("{msg}: {percent}% {bar:40} {eta}").unwrap(),
    );

    table
        .par_chunks_exact_mut(n_coords)
        .enumerate()
        .for_each(|(m, row)| {
            for (coord, value) in row.iter_mut().enumerate() {
                *value = entry(Move(m as u8), coord);
            }
            progress.inc(1);
        });

    progress.finish_and_clear();
}

/// C3 coordinate transitions under the phase 2 move set
static C3_MOVE_TABLE: Lazy<DiskTable<u32>> = Lazy::new(|| {
    DiskTable::load_or_generate(
        C3_MOVE_TABLE_FILENAME,
        N_PHASE2_MOVES * N_C3_COORD_STATES as usize,
        |table| {
            fill_move_table(table, C3_MOVE_TABLE_FILENAME, N_C3_COORD_STATES as usize, |m, coord| {
                CubieCube::from_coords(coord as u32, 0, 0, 0)
                    .apply_move(m)
                    .orientation
                    .c3_coord()
            });
        },
    )
});

/// IO coordinate transitions under the phase 2 move set
static IO_MOVE_TABLE: Lazy<DiskTable<u16>> = Lazy::new(|| {
    DiskTable::load_or_generate(
        IO_MOVE_TABLE_FILENAME,
        N_PHASE2_MOVES * N_IO_COORD_STATES as usize,
        |table| {
            fill_move_table(table, IO_MOVE_TABLE_FILENAME, N_IO_COORD_STATES as usize, |m, coord| {
                CubieCube::from_coords(0, coord as u16, 0, 0)
                    .apply_move(m)
                    .permutation
                    .io_coord()
            });
        },
    )
});

/// I coordinate transitions under the phase 3 move set
static I_MOVE_TABLE: Lazy<DiskTable<u16>> = Lazy::new(|| {
    DiskTable::load_or_generate(
        I_MOVE_TABLE_FILENAME,
        N_PHASE3_MOVES * N_I_COORD_STATES as usize,
        |table| {
            fill_move_table(table, I_MOVE_TABLE_FILENAME, N_I_COORD_STATES as usize, |m, coord| {
                CubieCube::from_coords(0, 0, coord as u16, 0)
                    .apply_move(m)
                    .permutation
                    .i_coord()
            });
        },
    )
});

/// O coordinate transitions under the phase 3 move set
static O_MOVE_TABLE: Lazy<DiskTable<u16>> = Lazy::new(|| {
    DiskTable::load_or_generate(
        O_MOVE_TABLE_FILENAME,
        N_PHASE3_MOVES * N_O_COORD_STATES as usize,
        |table| {
            fill_move_table(table, O_MOVE_TABLE_FILENAME, N_O_COORD_STATES as usize, |m, coord| {
                CubieCube::from_coords(0, 0, 0, coord as u16)
                    .apply_move(m)
                    .permutation
                    .o_coord()
            });
        },
    )
});

pub(crate) fn c3_move(m: Move, coord: u32) -> u32 {
    C3_MOVE_TABLE.as_slice()[m.as_usize() * N_C3_COORD_STATES as usize + coord as usize]
}

pub(crate) fn io_move(m: Move, coord: u16) -> u16 {
    IO_MOVE_TABLE.as_slice()[m.as_usize() * N_IO_COORD_STATES as usize + coord as usize]
}

pub(crate) fn i_move(m: Move, coord: u16) -> u16 {
    I_MOVE_TABLE.as_slice()[m.as_usize() * N_I_COORD_STATES as usize + coord as usize]
}

pub(crate) fn o_move(m: Move, coord: u16) -> u16 {
    O_MOVE_TABLE.as_slice()[m.as_usize() * N_O_COORD_STATES as usize + coord as usize]
}

/// Forces generation of all six move tables
pub fn generate_move_tables() {
    Lazy::force(&PERM_MOVE_TABLE);
    Lazy::force(&A4_MOVE_TABLE);
    Lazy::force(&C3_MOVE_TABLE);
    Lazy::force(&IO_MOVE_TABLE);
    Lazy::force(&I_MOVE_TABLE);
    Lazy::force(&O_MOVE_TABLE);
}
