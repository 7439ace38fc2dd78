//! Tetrahedralization input (piecewise linear complex plus optional volume data).

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TetMesh;

/// A single planar polygon bounding the domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    /// Polygon corners as 0-based point indices, in winding order.
    pub vertices: Vec<u32>,

    /// Boundary marker (0 if the source format has none).
    pub marker: i32,
}

impl Facet {
    /// Create a facet with the given corners and marker.
    #[inline]
    #[must_use]
    pub const fn new(vertices: Vec<u32>, marker: i32) -> Self {
        Self { vertices, marker }
    }

    /// Create an unmarked triangular facet.
    #[inline]
    #[must_use]
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self::new(vec![a, b, c], 0)
    }

    /// Corners as a triangle, if the facet has exactly three.
    #[must_use]
    pub fn as_triangle(&self) -> Option<[u32; 3]> {
        match self.vertices.as_slice() {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }
}

/// Everything a tetrahedralizer may consume from disk.
///
/// Mirrors a TetGen input object: points with optional attributes and
/// markers, polygonal facets, and (for refinement) an existing tetrahedral
/// mesh with optional per-tetrahedron volume constraints.
///
/// Optional per-element arrays are either empty or have one entry per element.
///
/// # Example
///
/// ```
/// use volmesh_types::{unit_cube, TetInput};
///
/// let input = TetInput::from(unit_cube());
/// assert_eq!(input.point_count(), 8);
/// assert_eq!(input.facet_count(), 12);
/// assert_eq!(input.surface_triangles().count(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TetInput {
    /// Point positions.
    pub points: Vec<Point3<f64>>,

    /// Per-point attributes (each row has the same length).
    pub point_attributes: Vec<Vec<f64>>,

    /// Per-point boundary markers.
    pub point_markers: Vec<i32>,

    /// Polygonal facets.
    pub facets: Vec<Facet>,

    /// Existing tetrahedra (corner nodes only).
    pub tetrahedra: Vec<[u32; 4]>,

    /// Per-tetrahedron attributes (each row has the same length).
    pub tetrahedron_attributes: Vec<Vec<f64>>,

    /// Per-tetrahedron maximum volume; negative means unconstrained.
    pub volume_constraints: Vec<f64>,

    /// Constrained edges.
    pub edges: Vec<[u32; 2]>,

    /// Per-edge boundary markers.
    pub edge_markers: Vec<i32>,
}

impl TetInput {
    /// Create an empty input.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of facets.
    #[inline]
    #[must_use]
    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    /// Check if the input contains no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the facets that are triangles.
    pub fn surface_triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.facets.iter().filter_map(Facet::as_triangle)
    }

    /// Convert into a [`TetMesh`], keeping only triangular facets.
    ///
    /// Markers, attributes, edges and volume constraints are dropped.
    #[must_use]
    pub fn into_tet_mesh(self) -> TetMesh {
        let triangles = self.surface_triangles().collect();
        TetMesh::from_parts(self.points, self.tetrahedra, triangles)
    }
}

impl From<TetMesh> for TetInput {
    /// Surface triangles become facets with marker 1.
    fn from(mesh: TetMesh) -> Self {
        let facets = mesh
            .triangles
            .iter()
            .map(|&[a, b, c]| Facet::new(vec![a, b, c], 1))
            .collect();

        Self {
            points: mesh.vertices,
            facets,
            tetrahedra: mesh.tetrahedra,
            ..Self::default()
        }
    }
}
