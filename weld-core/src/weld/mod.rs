//! Vertex deduplication.
//!
//! [`weld`] is the hash-table engine: one pass over the expanded stream,
//! exact equality, first occurrence of a record becomes canonical. For every
//! input vertex it either finds an identical record already stored and emits
//! that record's index, or appends the vertex as a new unique entry.
//!
//! [`weld_linear`] is the brute-force variant kept for small meshes and
//! cross-checking; it is also the only path that offers tolerant matching,
//! since the hash is computed from exact float bit patterns and cannot be
//! combined with an epsilon compare.

mod table;

use crate::Vertex;
use crate::arena::ScratchArena;
use crate::error::{WeldError, WeldResult};
use crate::mesh::MeshData;
use table::VertexHashTable;

/// Threshold for tolerant matching in [`weld_linear`].
pub const DEFAULT_TOLERANCE: f32 = 1.0e-4;

pub struct WeldConfig {
    /// Bucket count for the hash table; rounded up to a power of two. Large
    /// enough by default to keep expected collision lists short for meshes
    /// near the 16-bit index limit.
    pub bucket_count: usize,
}

impl Default for WeldConfig {
    fn default() -> Self {
        Self {
            bucket_count: 256 * 1024,
        }
    }
}

/// Deduplicates an expanded vertex stream.
///
/// Returns a mesh whose index buffer has exactly one entry per input vertex
/// and whose vertex buffer holds each distinct record once, in first-seen
/// order. Fails with [`WeldError::IndexOverflow`] if the unique count cannot
/// be represented in 16-bit indices.
pub fn weld(
    expanded: &[Vertex],
    arena: &mut ScratchArena,
    config: &WeldConfig,
) -> WeldResult<MeshData> {
    let bucket_count = config.bucket_count.max(1).next_power_of_two();
    let mut table = VertexHashTable::new(bucket_count, arena)?;

    // Worst case: nothing merges. Truncated to the unique count at the end.
    let mut vertices = arena.alloc_zeroed::<Vertex>(expanded.len())?;
    let mut indices = arena.alloc_zeroed::<u16>(expanded.len())?;
    let mut unique_count = 0usize;

    for (slot, vertex) in indices.iter_mut().zip(expanded) {
        if let Some(found) = table.lookup(&vertices[..unique_count], vertex) {
            *slot = found as u16;
        } else {
            if unique_count > u16::MAX as usize {
                return Err(WeldError::IndexOverflow(unique_count + 1));
            }
            vertices[unique_count] = *vertex;
            unique_count += 1;
            table.insert_unique(&vertices[..unique_count], (unique_count - 1) as u32);
            *slot = (unique_count - 1) as u16;
        }
    }

    vertices.truncate(unique_count);
    log::debug!("welded {} vertices down to {}", expanded.len(), unique_count);

    Ok(MeshData { vertices, indices })
}

/// Brute-force deduplication: scans the output buffer for every input vertex.
///
/// With `tolerance = None` this matches [`weld`] exactly; with a tolerance it
/// merges records whose components all differ by less than the threshold.
/// O(input * unique), intended for small meshes.
pub fn weld_linear(
    expanded: &[Vertex],
    tolerance: Option<f32>,
    arena: &mut ScratchArena,
) -> WeldResult<MeshData> {
    let mut vertices = arena.alloc_zeroed::<Vertex>(expanded.len())?;
    let mut indices = arena.alloc_zeroed::<u16>(expanded.len())?;
    let mut unique_count = 0usize;

    for (slot, vertex) in indices.iter_mut().zip(expanded) {
        let found = vertices[..unique_count].iter().position(|candidate| match tolerance {
            Some(t) => candidate.nearly_eq(vertex, t),
            None => candidate.exact_eq(vertex),
        });

        if let Some(found) = found {
            *slot = found as u16;
        } else {
            if unique_count > u16::MAX as usize {
                return Err(WeldError::IndexOverflow(unique_count + 1));
            }
            vertices[unique_count] = *vertex;
            *slot = unique_count as u16;
            unique_count += 1;
        }
    }

    vertices.truncate(unique_count);

    Ok(MeshData { vertices, indices })
}
