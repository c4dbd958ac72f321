//! Vertex expansion: undo indexing so every triangle corner owns its record.

use crate::Vertex;
use crate::arena::ScratchArena;
use crate::error::{WeldError, WeldResult};
use crate::mesh::MeshData;

/// Materializes one vertex record per index, in index-buffer order.
///
/// The output length always equals `mesh.indices.len()`. An index outside the
/// vertex buffer is rejected as malformed input.
pub fn expand(mesh: &MeshData, arena: &mut ScratchArena) -> WeldResult<Vec<Vertex>> {
    let mut expanded = arena.alloc_zeroed::<Vertex>(mesh.indices.len())?;

    for (slot, &index) in expanded.iter_mut().zip(&mesh.indices) {
        let vertex = mesh.vertices.get(index as usize).ok_or_else(|| {
            WeldError::MalformedInput(format!(
                "index {} out of range for {} vertices",
                index,
                mesh.vertices.len()
            ))
        })?;
        *slot = *vertex;
    }

    Ok(expanded)
}
