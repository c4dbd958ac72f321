//! Binary mesh format.
//!
//! Layout (host-endian, no magic or version tag):
//!
//! ```text
//! VERTEX_COUNT:  u32
//! INDEX_COUNT:   u32
//! VERTEX_BUFFER: [Vertex; VERTEX_COUNT]   (8 x f32 each)
//! INDEX_BUFFER:  [u16; INDEX_COUNT]
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use bytemuck::{Pod, Zeroable, cast_slice, cast_slice_mut};
use glam::Vec3;
use memmap2::Mmap;

use crate::arena::ScratchArena;
use crate::error::{WeldError, WeldResult};
use crate::Vertex;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MeshHeader {
    pub vertex_count: u32,
    pub index_count: u32,
}

const HEADER_SIZE: usize = std::mem::size_of::<MeshHeader>();
const VERTEX_SIZE: usize = std::mem::size_of::<Vertex>();

#[derive(Debug)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Axis-aligned bounds over the vertex positions, `None` for an empty
    /// vertex buffer.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for v in &self.vertices {
            let p = Vec3::from(v.position);
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}

/// Loads a mesh file, charging both buffers to `arena`.
///
/// The file length is validated against the header-declared counts before
/// either array is read, so truncated or padded files are rejected instead of
/// being misread.
pub fn load_mesh<P: AsRef<Path>>(path: P, arena: &mut ScratchArena) -> WeldResult<MeshData> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| WeldError::File(format!("{}: {}", path.display(), e)))?;
    let mmap = unsafe { Mmap::map(&file) }
        .map_err(|e| WeldError::File(format!("{}: {}", path.display(), e)))?;

    if mmap.len() < HEADER_SIZE {
        return Err(WeldError::MalformedInput(format!(
            "{}: {} bytes is too small for a mesh header",
            path.display(),
            mmap.len()
        )));
    }

    let header: MeshHeader = bytemuck::pod_read_unaligned(&mmap[..HEADER_SIZE]);
    let vertex_count = header.vertex_count as usize;
    let index_count = header.index_count as usize;

    let vertex_bytes = vertex_count * VERTEX_SIZE;
    let index_bytes = index_count * std::mem::size_of::<u16>();
    let expected = HEADER_SIZE + vertex_bytes + index_bytes;
    if mmap.len() != expected {
        return Err(WeldError::MalformedInput(format!(
            "{}: header declares {} vertices and {} indices ({} bytes), file is {} bytes",
            path.display(),
            vertex_count,
            index_count,
            expected,
            mmap.len()
        )));
    }

    let mut vertices = arena.alloc_zeroed::<Vertex>(vertex_count)?;
    let mut indices = arena.alloc_zeroed::<u16>(index_count)?;

    let vertex_src = &mmap[HEADER_SIZE..HEADER_SIZE + vertex_bytes];
    cast_slice_mut::<Vertex, u8>(&mut vertices).copy_from_slice(vertex_src);
    cast_slice_mut::<u16, u8>(&mut indices).copy_from_slice(&mmap[HEADER_SIZE + vertex_bytes..]);

    log::debug!(
        "loaded {}: {} vertices, {} indices",
        path.display(),
        vertex_count,
        index_count
    );

    Ok(MeshData { vertices, indices })
}

/// Writes a mesh in the same binary layout the loader reads.
pub fn save_mesh<P: AsRef<Path>>(path: P, mesh: &MeshData) -> WeldResult<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| WeldError::File(format!("{}: {}", path.display(), e)))?;
    let mut writer = std::io::BufWriter::with_capacity(1024 * 1024, file);

    let header = MeshHeader {
        vertex_count: mesh.vertices.len() as u32,
        index_count: mesh.indices.len() as u32,
    };

    let io_err = |e: std::io::Error| WeldError::File(format!("{}: {}", path.display(), e));
    writer.write_all(bytemuck::bytes_of(&header)).map_err(io_err)?;
    writer.write_all(cast_slice(&mesh.vertices)).map_err(io_err)?;
    writer.write_all(cast_slice(&mesh.indices)).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(())
}
