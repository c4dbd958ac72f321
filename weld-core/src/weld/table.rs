use crate::Vertex;
use crate::arena::ScratchArena;
use crate::error::WeldResult;

/// Collision lists grow one block of this many slots at a time.
pub(crate) const CHAIN_BLOCK_SLOTS: usize = 32;

/// Cheap positional bit-mix over the three position floats. Collisions across
/// distinct positions are expected and resolved by full-record comparison,
/// so attribute-only differences always land in the same bucket.
pub(crate) fn hash_position(vertex: &Vertex) -> u64 {
    let a = vertex.position[0].to_bits();
    let b = vertex.position[1].to_bits();
    let c = vertex.position[2].to_bits();

    let lower = a | ((b >> 4) ^ c);
    let upper = b ^ (a >> 5) ^ c;

    ((upper as u64) << 32) | lower as u64
}

/// Open-chaining table mapping a positional hash to the compacted indices of
/// every unique vertex stored so far. Append-only: entries are never removed
/// or rehashed, and the bucket count is fixed for the whole pass.
pub(crate) struct VertexHashTable {
    buckets: Vec<Vec<u32>>,
    mask: u64,
}

impl VertexHashTable {
    /// `bucket_count` must be a power of two so bucket selection is a mask.
    /// The bucket array is charged against the arena budget.
    pub fn new(bucket_count: usize, arena: &mut ScratchArena) -> WeldResult<Self> {
        debug_assert!(bucket_count.is_power_of_two());
        arena.charge(bucket_count * std::mem::size_of::<Vec<u32>>())?;
        Ok(Self {
            buckets: vec![Vec::new(); bucket_count],
            mask: (bucket_count - 1) as u64,
        })
    }

    /// Scans the collision list for a record identical to `vertex` and
    /// returns its compacted index. `unique` is the canonical vertex buffer
    /// the stored indices point into.
    pub fn lookup(&self, unique: &[Vertex], vertex: &Vertex) -> Option<u32> {
        let bucket = &self.buckets[(hash_position(vertex) & self.mask) as usize];
        bucket
            .iter()
            .copied()
            .find(|&index| unique[index as usize].exact_eq(vertex))
    }

    /// Records a compacted index whose vertex is already known to be absent
    /// from the table.
    pub fn insert_unique(&mut self, unique: &[Vertex], index: u32) {
        let slot = (hash_position(&unique[index as usize]) & self.mask) as usize;
        let bucket = &mut self.buckets[slot];
        if bucket.len() == bucket.capacity() {
            bucket.reserve_exact(CHAIN_BLOCK_SLOTS);
        }
        bucket.push(index);
    }
}
