//! On-disk lookup tables. Every table is a raw little-endian array with a
//! known filename and element count; tables present at startup are mapped
//! read-only, missing tables are generated in place and then remapped.

pub(crate) mod moves;
pub(crate) mod prune;

use std::fs::{File, OpenOptions};
use std::marker::PhantomData;
use std::path::PathBuf;

// the table files are mapped directly as typed slices
#[cfg(target_endian = "big")]
compile_error!("table files are little-endian and are mapped without conversion");

/// Returns the path of a table file, next to the executable
pub(crate) fn table_path(filename: &str) -> PathBuf {
    std::env::current_exe()
        .expect("executable filepath not found")
        .parent()
        .expect("executable not in a parent directory")
        .join(filename)
}

fn file_has_size(path: &PathBuf, n_bytes: u64) -> bool {
    std::fs::metadata(path)
        .map(|metadata| metadata.len() == n_bytes)
        .unwrap_or(false)
}

/// Loads a small table into memory, generating and writing it first if the
/// file is missing or has the wrong size
pub(crate) fn load_or_generate_small(
    filename: &str,
    n_bytes: usize,
    generate: impl FnOnce() -> Vec<u8>,
) -> Vec<u8> {
    let path = table_path(filename);

    if file_has_size(&path, n_bytes as u64) {
        if let Ok(bytes) = std::fs::read(&path) {
            return bytes;
        }
    }

    let bytes = generate();
    debug_assert_eq!(bytes.len(), n_bytes);
    std::fs::write(&path, &bytes).expect("unable to write table file");
    bytes
}

/// A read-only memory-mapped table of plain elements
pub(crate) struct DiskTable<T> {
    map: memmap2::Mmap,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> DiskTable<T> {
    pub fn as_slice(&self) -> &[T] {
        bytemuck::cast_slice(&self.map)
    }

    /// Maps the table read-only. If the file is missing or has the wrong
    /// size it is first generated through a writable map of the same file,
    /// then remapped.
    pub fn load_or_generate(
        filename: &str,
        len: usize,
        generate: impl FnOnce(&mut [T]),
    ) -> DiskTable<T> {
        let path = table_path(filename);
        let n_bytes = len * std::mem::size_of::<T>();

        if !file_has_size(&path, n_bytes as u64) {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(&path)
                .expect("unable to create table file");
            file.set_len(n_bytes as u64).expect("unable to size table file");

            let mut map =
                unsafe { memmap2::MmapMut::map_mut(&file) }.expect("unable to map table file");
            generate(bytemuck::cast_slice_mut(&mut map));
            map.flush().expect("unable to flush table file");
        }

        let file = File::open(&path).expect("unable to open table file");
        let map = unsafe { memmap2::Mmap::map(&file) }.expect("unable to map table file");

        DiskTable {
            map,
            _marker: PhantomData,
        }
    }
}
