//! Conformance tests for the MEDIT writer on disk.
//!
//! These tests pin the exact bytes downstream MEDIT readers expect and the
//! guarantees of the list interface (shape rejection before any I/O,
//! truncation, idempotence).
//!
//! To run: cargo test -p volmesh-io --test medit_conformance

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;

use tempfile::tempdir;
use volmesh_io::{
    IoError, load_medit, load_tet_input, save_medit, save_medit_lists, write_mesh,
};
use volmesh_types::{unit_cube, TetMesh};

const SINGLE_TET: &str = "\
MeshVersionFormatted 1
Dimension 3
Vertices
4
0 0 0 1
1 0 0 1
0 1 0 1
0 0 1 1
Triangles
1
1 2 3 1
Tetrahedra
1
1 2 3 4 1
";

fn single_tet_lists() -> (Vec<Vec<f64>>, Vec<Vec<i32>>, Vec<Vec<i32>>) {
    let v = vec![
        vec![0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ];
    let t = vec![vec![0, 1, 2, 3]];
    let f = vec![vec![0, 1, 2]];
    (v, t, f)
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read output")
}

// =============================================================================
// Exact Output
// =============================================================================

#[test]
fn single_tetrahedron_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tet.mesh");
    let (v, t, f) = single_tet_lists();

    assert!(write_mesh(&path, &v, &t, &f));
    assert_eq!(read(&path), SINGLE_TET);
}

#[test]
fn empty_mesh_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.mesh");
    let v: Vec<Vec<f64>> = Vec::new();
    let e: Vec<Vec<u32>> = Vec::new();

    save_medit_lists(&v, &e, &e, &path).unwrap();
    assert_eq!(
        read(&path),
        "MeshVersionFormatted 1\nDimension 3\nVertices\n0\nTriangles\n0\nTetrahedra\n0\n"
    );
}

#[test]
fn line_count_is_eight_plus_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cube.mesh");
    let cube = unit_cube();

    save_medit(&cube, &path).unwrap();

    let expected =
        8 + cube.vertex_count() + cube.triangle_count() + cube.tetrahedron_count();
    let text = read(&path);
    assert_eq!(text.lines().count(), expected);
    assert!(text.ends_with('\n'));
}

#[test]
fn writing_twice_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cube.mesh");
    let cube = unit_cube();

    save_medit(&cube, &path).unwrap();
    let first = std::fs::read(&path).unwrap();
    save_medit(&cube, &path).unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn existing_file_is_truncated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tet.mesh");
    std::fs::write(&path, "x".repeat(4096)).unwrap();

    let (v, t, f) = single_tet_lists();
    save_medit_lists(&v, &t, &f, &path).unwrap();
    assert_eq!(read(&path), SINGLE_TET);
}

// =============================================================================
// Shape Rejection
// =============================================================================

#[test]
fn jagged_vertices_leave_existing_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("keep.mesh");
    std::fs::write(&path, "previous contents").unwrap();

    let v = vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0]];
    let (_, t, f) = single_tet_lists();

    assert!(!write_mesh(&path, &v, &t, &f));
    assert_eq!(read(&path), "previous contents");
}

#[test]
fn jagged_tetrahedra_create_no_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.mesh");
    let (v, _, f) = single_tet_lists();
    let t = vec![vec![0, 1, 2, 3], vec![0, 1, 2]];

    let err = save_medit_lists(&v, &t, &f, &path).unwrap_err();
    assert!(matches!(
        err,
        IoError::JaggedRows {
            container: "tetrahedra",
            row: 1,
            expected: 4,
            got: 3,
        }
    ));
    assert!(!path.exists());
}

#[test]
fn uniform_but_wrong_width_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("never.mesh");
    let (v, t, _) = single_tet_lists();
    let quads = vec![vec![0, 1, 2, 3]];

    let err = save_medit_lists(&v, &t, &quads, &path).unwrap_err();
    assert!(matches!(err, IoError::RowArity { container: "triangles", .. }));
    assert!(!path.exists());
}

// =============================================================================
// Write Failures
// =============================================================================

#[cfg(target_os = "linux")]
#[test]
fn full_device_is_reported() {
    let full = Path::new("/dev/full");

    let err = save_medit(&unit_cube(), full).unwrap_err();
    assert!(matches!(err, IoError::Io(_)), "unexpected error: {err}");

    let (v, t, f) = single_tet_lists();
    assert!(!write_mesh(full, &v, &t, &f));
}

// =============================================================================
// Reading Back
// =============================================================================

#[test]
fn unit_cube_survives_a_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cube.mesh");
    let cube = unit_cube();

    save_medit(&cube, &path).unwrap();
    let loaded = load_medit(&path).unwrap();

    assert_eq!(loaded, cube);
    assert!(loaded.has_valid_indices());
    approx::assert_relative_eq!(loaded.volume(), 1.0, epsilon = 1e-12);
}

#[test]
fn tetgen_collection_converts_to_medit() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("tet.1");
    std::fs::write(
        dir.path().join("tet.1.node"),
        "4 3 0 0\n1 0 0 0\n2 1 0 0\n3 0 1 0\n4 0 0 1\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("tet.1.ele"), "1 4 0\n1 1 2 3 4\n").unwrap();
    std::fs::write(
        dir.path().join("tet.1.face"),
        "4 1\n1 1 3 2 1\n2 1 2 4 1\n3 2 3 4 1\n4 1 4 3 1\n",
    )
    .unwrap();

    let mesh: TetMesh = load_tet_input(&base).unwrap().into_tet_mesh();
    assert_eq!(mesh.tetrahedra, vec![[0, 1, 2, 3]]);
    assert_eq!(mesh.triangle_count(), 4);

    let out = dir.path().join("tet.mesh");
    save_medit(&mesh, &out).unwrap();

    let text = read(&out);
    assert!(text.contains("Tetrahedra\n1\n1 2 3 4 1\n"));
    assert!(text.contains("Triangles\n4\n1 3 2 1\n"));
    assert_eq!(load_medit(&out).unwrap(), mesh);
}
