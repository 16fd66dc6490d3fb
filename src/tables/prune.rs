//! Pruning tables: breadth-first distance-to-goal in each phase's
//! coordinate space. A value at most the table's pruning depth is an exact
//! distance; the sentinel `depth + 1` means "at least that far".

use std::collections::HashMap;
use std::marker::PhantomData;

use once_cell::sync::Lazy;

use crate::common::Axis;
use crate::node_cube::{Node, Phase1Node, Phase2Node, Phase3Node};
use crate::phases::{MoveCursor, Phase};

use super::DiskTable;

/// Read access to a phase's distance table
pub trait PruningTable<N: Node> {
    /// A lower bound on the number of moves to reach the goal; exact when
    /// at most `pruning_depth`
    fn depth_bound(&self, node: N) -> u8;

    /// The depth to which values are exact
    fn pruning_depth(&self) -> u8;
}

/// Write access used while a table is generated
trait DepthStore<N: Node> {
    fn get(&self, node: N) -> u8;
    fn set(&mut self, node: N, depth: u8);
}

/// Two alternating frontier queues, tracking the depth of the frontier being
/// popped and reporting sweep progress
struct DepthQueue<T> {
    depth: u8,
    pop_from_first: bool,
    queue1: Vec<T>,
    queue2: Vec<T>,
    progress: indicatif::ProgressBar,
}

impl<T> DepthQueue<T> {
    fn new() -> Self {
        DepthQueue {
            depth: 0,
            pop_from_first: true,
            queue1: Vec::new(),
            queue2: Vec::new(),
            progress: indicatif::ProgressBar::hidden(),
        }
    }

    fn is_empty(&self) -> bool {
        self.queue1.is_empty() && self.queue2.is_empty()
    }

    fn len(&self) -> usize {
        match self.pop_from_first {
            false => self.queue1.len(),
            true => self.queue2.len(),
        }
    }

    fn push(&mut self, value: T) {
        match self.pop_from_first {
            false => self.queue1.push(value),
            true => self.queue2.push(value),
        }
    }

    fn pop(&mut self) -> Option<T> {
        let queue = if self.pop_from_first {
            &mut self.queue1
        } else {
            &mut self.queue2
        };

        if !queue.is_empty() {
            self.progress.inc(1);
            return queue.pop();
        }

        if self.is_empty() {
            self.progress.finish_and_clear();
            return None;
        }

        self.progress.finish_and_clear();
        self.progress = indicatif::ProgressBar::new(self.len() as u64)
            .with_message(format!("Exploring depth {}", self.depth + 1));
        self.progress.set_style(
            indicatif::ProgressStyle::with_template(
                "{msg}: {percent}% of {human_len} nodes {bar:40} {eta}",
            )
            .unwrap(),
        );
        self.pop_from_first = !self.pop_from_first;
        self.depth += 1;
        self.pop()
    }

    /// The depth of the nodes currently being popped
    fn depth(&self) -> u8 {
        self.depth
    }
}

/// Fills the store with breadth-first distances from the goal, up to
/// `max_depth`. Queue entries carry the last move's axis so that redundant
/// same-axis successors are never expanded.
fn breadth_first_fill<N: Node, S: DepthStore<N>>(store: &mut S, max_depth: u8) {
    store.set(N::goal(), 0);
    if max_depth == 0 {
        return;
    }

    let mut queue: DepthQueue<(N, Option<Axis>)> = DepthQueue::new();
    queue.push((N::goal(), None));

    while let Some((node, last_axis)) = queue.pop() {
        let start_axis = last_axis.map(Axis::next).unwrap_or_default();

        for m in MoveCursor::<N::Phase>::new(start_axis, last_axis) {
            let new_node = node.apply_move(m);

            if store.get(new_node) > queue.depth() {
                store.set(new_node, queue.depth());
                if queue.depth() < max_depth {
                    queue.push((new_node, Some(m.axis())));
                }
            }
        }
    }
}

/// A pruning table backed by a hash map, for shallow tables over spaces too
/// large to fill completely
pub struct HashMapPruningTable<N: Node> {
    pub data: HashMap<u64, u8>,
    max_depth: u8,
    _marker: PhantomData<N>,
}

impl<N: Node> HashMapPruningTable<N> {
    /// Generates the table by breadth-first search to the given depth
    pub fn generate(max_depth: u8) -> Self {
        let mut table = HashMapPruningTable {
            data: HashMap::new(),
            max_depth,
            _marker: PhantomData,
        };
        breadth_first_fill(&mut table, max_depth);
        table.data.shrink_to_fit();
        table
    }
}

impl<N: Node> DepthStore<N> for HashMapPruningTable<N> {
    fn get(&self, node: N) -> u8 {
        self.depth_bound(node)
    }

    fn set(&mut self, node: N, depth: u8) {
        self.data.insert(node.index(), depth);
    }
}

impl<N: Node> PruningTable<N> for HashMapPruningTable<N> {
    fn depth_bound(&self, node: N) -> u8 {
        match self.data.get(&node.index()) {
            Some(&depth) => depth,
            None => self.max_depth + 1,
        }
    }

    fn pruning_depth(&self) -> u8 {
        self.max_depth
    }
}

struct SliceStore<'a, N> {
    data: &'a mut [u8],
    _marker: PhantomData<N>,
}

impl<N: Node> DepthStore<N> for SliceStore<'_, N> {
    fn get(&self, node: N) -> u8 {
        self.data[node.index() as usize]
    }

    fn set(&mut self, node: N, depth: u8) {
        self.data[node.index() as usize] = depth;
    }
}

/// A pruning table backed by a read-only memory map of its table file
pub struct DiskPruningTable<N: Node> {
    table: DiskTable<u8>,
    max_depth: u8,
    _marker: PhantomData<N>,
}

impl<N: Node> DiskPruningTable<N> {
    /// Maps the phase's table file, generating it first if missing. The
    /// generation sweep writes through a writable map of the file and never
    /// materializes the table in private memory.
    pub fn load_or_generate() -> Self {
        let max_depth = N::Phase::PRUNING_DEPTH;

        let table = DiskTable::load_or_generate(
            N::Phase::PRUNING_TABLE_FILENAME,
            N::N_STATES as usize,
            |slice| {
                slice.fill(max_depth + 1);
                let mut store = SliceStore::<N> {
                    data: slice,
                    _marker: PhantomData,
                };
                breadth_first_fill(&mut store, max_depth);
            },
        );

        DiskPruningTable {
            table,
            max_depth,
            _marker: PhantomData,
        }
    }
}

impl<N: Node> PruningTable<N> for DiskPruningTable<N> {
    fn depth_bound(&self, node: N) -> u8 {
        self.table.as_slice()[node.index() as usize]
    }

    fn pruning_depth(&self) -> u8 {
        self.max_depth
    }
}

pub(crate) static PHASE1_PRUNING_TABLE: Lazy<DiskPruningTable<Phase1Node>> =
    Lazy::new(DiskPruningTable::load_or_generate);
pub(crate) static PHASE2_PRUNING_TABLE: Lazy<DiskPruningTable<Phase2Node>> =
    Lazy::new(DiskPruningTable::load_or_generate);
pub(crate) static PHASE3_PRUNING_TABLE: Lazy<DiskPruningTable<Phase3Node>> =
    Lazy::new(DiskPruningTable::load_or_generate);

/// The pruning tables a solve reads from. Tables are read-only and may be
/// shared by any number of concurrent solves.
#[derive(Clone, Copy)]
pub struct PruningTables<'a> {
    pub phase1: &'a dyn PruningTable<Phase1Node>,
    pub phase2: &'a dyn PruningTable<Phase2Node>,
    pub phase3: &'a dyn PruningTable<Phase3Node>,
}

impl PruningTables<'static> {
    /// The shared disk-backed tables, generated on first use
    pub fn shared() -> Self {
        PruningTables {
            phase1: &*PHASE1_PRUNING_TABLE,
            phase2: &*PHASE2_PRUNING_TABLE,
            phase3: &*PHASE3_PRUNING_TABLE,
        }
    }
}

/// Forces generation of all three pruning tables
pub fn generate_pruning_tables() {
    Lazy::force(&PHASE1_PRUNING_TABLE);
    Lazy::force(&PHASE2_PRUNING_TABLE);
    Lazy::force(&PHASE3_PRUNING_TABLE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase1_nodes_within_two_moves() {
        let table = HashMapPruningTable::<Phase1Node>::generate(2);
        assert_eq!(table.data.len(), 166);
    }

    #[test]
    #[ignore = "generates the C3 move table on disk"]
    fn phase2_nodes_within_two_moves() {
        let table = HashMapPruningTable::<Phase2Node>::generate(2);
        assert_eq!(table.data.len(), 152);
    }

    #[test]
    fn phase3_nodes_within_two_moves() {
        let table = HashMapPruningTable::<Phase3Node>::generate(2);
        assert_eq!(table.data.len(), 70);
    }

    #[test]
    fn shallow_phase1_depths_are_exact() {
        let shallow = HashMapPruningTable::<Phase1Node>::generate(1);
        let deeper = HashMapPruningTable::<Phase1Node>::generate(3);

        for (&index, &depth) in &shallow.data {
            assert_eq!(deeper.data[&index], depth);
        }
    }

    #[test]
    #[ignore = "generates the phase 3 pruning table on disk"]
    fn phase3_table_is_complete() {
        let table = &*PHASE3_PRUNING_TABLE;
        let sentinel = table.pruning_depth() + 1;
        let max = (0..Phase3Node::N_STATES)
            .map(|index| table.depth_bound(Phase3Node::from_index(index)))
            .max()
            .unwrap();
        assert!(max < sentinel);
        assert!(max <= 21);
    }
}
