//! Property-based tests for the MEDIT writer and reader.
//!
//! Run with: cargo test -p volmesh-io -- proptest

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use volmesh_io::{parse_medit, write_medit, MeditParams, Real};
use volmesh_types::{Point3, TetMesh};

// =============================================================================
// Strategies
// =============================================================================

/// Any finite coordinate, including subnormals and extreme exponents.
fn arb_coordinate() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
}

fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(arb_coordinate()).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// A mesh whose elements all reference existing vertices.
fn arb_tet_mesh(max_vertices: usize, max_elements: usize) -> impl Strategy<Value = TetMesh> {
    prop::collection::vec(arb_point(), 1..=max_vertices).prop_flat_map(move |vertices| {
        let n = vertices.len() as u32;
        let tets = prop::collection::vec(prop::array::uniform4(0..n), 0..=max_elements);
        let tris = prop::collection::vec(prop::array::uniform3(0..n), 0..=max_elements);
        (Just(vertices), tets, tris)
            .prop_map(|(v, t, f)| TetMesh::from_parts(v, t, f))
    })
}

fn render(mesh: &TetMesh) -> String {
    let mut buf = Vec::new();
    write_medit(&mut buf, mesh, &MeditParams::default()).unwrap();
    String::from_utf8(buf).unwrap()
}

// =============================================================================
// Property Tests: Output Layout
// =============================================================================

proptest! {
    /// Every element row is written as stored index + 1.
    #[test]
    fn indices_are_shifted_by_one(mesh in arb_tet_mesh(20, 20)) {
        let text = render(&mesh);
        let lines: Vec<&str> = text.lines().collect();

        let tri_start = 4 + mesh.vertex_count() + 2;
        for (k, tri) in mesh.triangles.iter().enumerate() {
            let expected = format!("{} {} {} 1", tri[0] + 1, tri[1] + 1, tri[2] + 1);
            prop_assert_eq!(lines[tri_start + k], expected.as_str());
        }

        let tet_start = tri_start + mesh.triangle_count() + 2;
        for (k, tet) in mesh.tetrahedra.iter().enumerate() {
            let expected =
                format!("{} {} {} {} 1", tet[0] + 1, tet[1] + 1, tet[2] + 1, tet[3] + 1);
            prop_assert_eq!(lines[tet_start + k], expected.as_str());
        }
    }

    /// The document has 8 header lines plus one line per row.
    #[test]
    fn line_count_law(mesh in arb_tet_mesh(30, 30)) {
        let text = render(&mesh);
        let expected =
            8 + mesh.vertex_count() + mesh.triangle_count() + mesh.tetrahedron_count();
        prop_assert_eq!(text.lines().count(), expected);
        prop_assert!(text.ends_with('\n'));
    }

    /// Writing the same mesh twice produces the same bytes.
    #[test]
    fn output_is_deterministic(mesh in arb_tet_mesh(10, 10)) {
        prop_assert_eq!(render(&mesh), render(&mesh));
    }
}

// =============================================================================
// Property Tests: Round Trip
// =============================================================================

proptest! {
    /// Formatted coordinates parse back to the identical f64.
    #[test]
    fn coordinates_round_trip(v in arb_coordinate()) {
        let parsed: f64 = Real(v).to_string().parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), v.to_bits());
    }

    /// Reading a written mesh reproduces it exactly.
    #[test]
    fn mesh_round_trip(mesh in arb_tet_mesh(20, 20)) {
        let parsed = parse_medit(&render(&mesh)).unwrap();
        prop_assert_eq!(parsed, mesh);
    }
}
