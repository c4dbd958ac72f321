//! Mesh vertex welding.
//!
//! Takes an expanded (triangle-soup) vertex stream and collapses identical
//! vertex records into a single entry referenced through a 16-bit index
//! buffer, plus the binary mesh format readers/writers around it.

use bytemuck::{Pod, Zeroable};

pub mod arena;
pub mod error;
pub mod expand;
pub mod mesh;
pub mod weld;

pub use arena::ScratchArena;
pub use error::{WeldError, WeldResult};
pub use expand::expand;
pub use mesh::{MeshData, MeshHeader, load_mesh, save_mesh};
pub use weld::{DEFAULT_TOLERANCE, WeldConfig, weld, weld_linear};

/// Number of f32 components per vertex record.
pub const VERTEX_FLOATS: usize = 8;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3], // 12 bytes
    pub normal: [f32; 3],   // 12 bytes
    pub uv: [f32; 2],       // 8 bytes, 32 total
}

impl Vertex {
    /// Exact IEEE-754 comparison on all 8 components. `+0.0` and `-0.0`
    /// compare equal, NaN never compares equal to anything.
    pub fn exact_eq(&self, other: &Vertex) -> bool {
        let a: &[f32; VERTEX_FLOATS] = bytemuck::cast_ref(self);
        let b: &[f32; VERTEX_FLOATS] = bytemuck::cast_ref(other);
        a.iter().zip(b).all(|(x, y)| x == y)
    }

    /// Component-wise comparison within `tolerance`, for the linear welder.
    pub fn nearly_eq(&self, other: &Vertex, tolerance: f32) -> bool {
        let a: &[f32; VERTEX_FLOATS] = bytemuck::cast_ref(self);
        let b: &[f32; VERTEX_FLOATS] = bytemuck::cast_ref(other);
        a.iter()
            .zip(b)
            .all(|(x, y)| (x - y) < tolerance && (y - x) < tolerance)
    }
}
