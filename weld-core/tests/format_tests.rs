//! File format round-trip and validation tests.

use weld_core::{MeshData, ScratchArena, Vertex, WeldConfig, WeldError, expand, load_mesh, save_mesh, weld};

fn sample_mesh() -> MeshData {
    let vertices = vec![
        Vertex {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 0.0],
        },
        Vertex {
            position: [1.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [1.0, 0.0],
        },
        Vertex {
            position: [0.0, 1.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 1.0],
        },
        Vertex {
            position: [1.0, 1.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [1.0, 1.0],
        },
    ];
    // A quad: two triangles sharing the 1/2 edge.
    let indices = vec![0, 1, 2, 2, 1, 3];
    MeshData { vertices, indices }
}

#[test]
fn save_then_load_preserves_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quad.bin");
    let mesh = sample_mesh();

    save_mesh(&path, &mesh).unwrap();
    let mut arena = ScratchArena::default();
    let loaded = load_mesh(&path, &mut arena).unwrap();

    assert_eq!(loaded.indices, mesh.indices);
    assert_eq!(loaded.vertices.len(), mesh.vertices.len());
    assert_eq!(
        bytemuck::cast_slice::<Vertex, u8>(&loaded.vertices),
        bytemuck::cast_slice::<Vertex, u8>(&mesh.vertices),
    );
}

#[test]
fn missing_file_is_a_file_error() {
    let mut arena = ScratchArena::default();
    let err = load_mesh("/nonexistent/mesh.bin", &mut arena).unwrap_err();
    assert!(matches!(err, WeldError::File(_)), "got {}", err);
}

#[test]
fn truncated_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truncated.bin");
    save_mesh(&path, &sample_mesh()).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes.truncate(bytes.len() - 2);
    std::fs::write(&path, &bytes).unwrap();

    let mut arena = ScratchArena::default();
    let err = load_mesh(&path, &mut arena).unwrap_err();
    assert!(matches!(err, WeldError::MalformedInput(_)), "got {}", err);
}

#[test]
fn trailing_bytes_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("padded.bin");
    save_mesh(&path, &sample_mesh()).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes.extend_from_slice(&[0u8; 4]);
    std::fs::write(&path, &bytes).unwrap();

    let mut arena = ScratchArena::default();
    let err = load_mesh(&path, &mut arena).unwrap_err();
    assert!(matches!(err, WeldError::MalformedInput(_)), "got {}", err);
}

#[test]
fn file_shorter_than_header_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stub.bin");
    std::fs::write(&path, [1u8, 2, 3]).unwrap();

    let mut arena = ScratchArena::default();
    let err = load_mesh(&path, &mut arena).unwrap_err();
    assert!(matches!(err, WeldError::MalformedInput(_)), "got {}", err);
}

#[test]
fn full_pipeline_preserves_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.bin");
    let output = dir.path().join("out.bin");
    let mesh = sample_mesh();
    save_mesh(&input, &mesh).unwrap();

    let mut arena = ScratchArena::default();
    let loaded = load_mesh(&input, &mut arena).unwrap();
    let expanded = expand(&loaded, &mut arena).unwrap();
    let welded = weld(&expanded, &mut arena, &WeldConfig::default()).unwrap();
    save_mesh(&output, &welded).unwrap();

    // The quad shares two corners, so welding the expanded stream must get
    // back to the original four vertices.
    let reloaded = load_mesh(&output, &mut arena).unwrap();
    assert_eq!(reloaded.vertices.len(), 4);
    assert_eq!(reloaded.indices.len(), 6);

    // Same triangles corner for corner, independent of vertex order.
    let re_expanded = expand(&reloaded, &mut arena).unwrap();
    assert_eq!(re_expanded.len(), expanded.len());
    for (a, b) in expanded.iter().zip(&re_expanded) {
        assert!(a.exact_eq(b));
    }
}

#[test]
fn empty_mesh_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bin");
    let mesh = MeshData {
        vertices: Vec::new(),
        indices: Vec::new(),
    };
    save_mesh(&path, &mesh).unwrap();

    let mut arena = ScratchArena::default();
    let loaded = load_mesh(&path, &mut arena).unwrap();
    assert!(loaded.vertices.is_empty());
    assert!(loaded.indices.is_empty());
    assert!(loaded.bounds().is_none());
}

#[test]
fn bounds_cover_all_positions() {
    let mesh = sample_mesh();
    let (min, max) = mesh.bounds().unwrap();
    assert_eq!(min, glam::Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(max, glam::Vec3::new(1.0, 1.0, 0.0));
}
