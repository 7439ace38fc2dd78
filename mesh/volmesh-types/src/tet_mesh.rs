//! Tetrahedral volume mesh.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A tetrahedral volume mesh.
///
/// Stores vertex positions, tetrahedra and the boundary (surface) triangles.
/// Surface and volume share the same vertex array, so a triangle index and a
/// tetrahedron index refer to the same vertex.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Point3<f64>>` - Vertex positions
/// - `tetrahedra`: `Vec<[u32; 4]>` - Tetrahedra as vertex indices
/// - `triangles`: `Vec<[u32; 3]>` - Surface triangles as vertex indices
///
/// Rows have a fixed arity, so a jagged mesh cannot be represented.
/// Index validity is not enforced; see [`TetMesh::has_valid_indices`].
///
/// # Example
///
/// ```
/// use volmesh_types::{Point3, TetMesh};
///
/// let mesh = TetMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(0.0, 0.0, 1.0),
///     ],
///     vec![[0, 1, 2, 3]],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TetMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Tetrahedra as indices into the vertex array.
    pub tetrahedra: Vec<[u32; 4]>,

    /// Surface triangles as indices into the vertex array.
    pub triangles: Vec<[u32; 3]>,
}

impl TetMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tetrahedra: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    ///
    /// # Arguments
    ///
    /// * `vertex_count` - Expected number of vertices
    /// * `tetrahedron_count` - Expected number of tetrahedra
    /// * `triangle_count` - Expected number of surface triangles
    #[inline]
    #[must_use]
    pub fn with_capacity(
        vertex_count: usize,
        tetrahedron_count: usize,
        triangle_count: usize,
    ) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            tetrahedra: Vec::with_capacity(tetrahedron_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Create a mesh from its parts.
    #[inline]
    #[must_use]
    pub const fn from_parts(
        vertices: Vec<Point3<f64>>,
        tetrahedra: Vec<[u32; 4]>,
        triangles: Vec<[u32; 3]>,
    ) -> Self {
        Self {
            vertices,
            tetrahedra,
            triangles,
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of tetrahedra.
    #[inline]
    #[must_use]
    pub fn tetrahedron_count(&self) -> usize {
        self.tetrahedra.len()
    }

    /// Number of surface triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no vertices, tetrahedra or triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.tetrahedra.is_empty() && self.triangles.is_empty()
    }

    /// Largest vertex index referenced by any tetrahedron or triangle.
    ///
    /// Returns `None` if the mesh has no elements.
    #[must_use]
    pub fn max_index(&self) -> Option<u32> {
        self.tetrahedra
            .iter()
            .flat_map(|t| t.iter())
            .chain(self.triangles.iter().flat_map(|t| t.iter()))
            .copied()
            .max()
    }

    /// Check that every element index is a valid vertex position.
    ///
    /// # Example
    ///
    /// ```
    /// use volmesh_types::{Point3, TetMesh};
    ///
    /// let mut mesh = TetMesh::new();
    /// mesh.vertices.push(Point3::origin());
    /// mesh.triangles.push([0, 0, 1]);
    /// assert!(!mesh.has_valid_indices());
    /// ```
    #[must_use]
    pub fn has_valid_indices(&self) -> bool {
        self.max_index()
            .map_or(true, |max| (max as usize) < self.vertices.len())
    }

    /// Signed volume of one tetrahedron.
    ///
    /// Positive when the fourth vertex lies on the side of the first three
    /// that their counter-clockwise winding points to.
    ///
    /// Returns `None` if `index` is out of range or the tetrahedron references
    /// a missing vertex.
    #[must_use]
    pub fn tetrahedron_signed_volume(&self, index: usize) -> Option<f64> {
        let [a, b, c, d] = *self.tetrahedra.get(index)?;
        let a = self.vertices.get(a as usize)?;
        let b = self.vertices.get(b as usize)?;
        let c = self.vertices.get(c as usize)?;
        let d = self.vertices.get(d as usize)?;

        let e1 = b - a;
        let e2 = c - a;
        let e3 = d - a;
        Some(e1.dot(&e2.cross(&e3)) / 6.0)
    }

    /// Total unsigned volume of all resolvable tetrahedra.
    #[must_use]
    pub fn volume(&self) -> f64 {
        (0..self.tetrahedra.len())
            .filter_map(|i| self.tetrahedron_signed_volume(i))
            .map(f64::abs)
            .sum()
    }
}

/// Create a unit cube split into five tetrahedra.
///
/// Vertex `i` sits at `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`. The twelve
/// boundary triangles wind counter-clockwise seen from outside and every
/// tetrahedron has positive signed volume.
///
/// # Example
///
/// ```
/// use volmesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.tetrahedron_count(), 5);
/// assert!((cube.volume() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn unit_cube() -> TetMesh {
    let vertices = (0..8u32)
        .map(|i| {
            Point3::new(
                f64::from(i & 1),
                f64::from((i >> 1) & 1),
                f64::from((i >> 2) & 1),
            )
        })
        .collect();

    let tetrahedra = vec![
        [0, 1, 2, 4],
        [3, 2, 1, 7],
        [5, 1, 4, 7],
        [6, 4, 2, 7],
        // Central tetrahedron
        [1, 2, 4, 7],
    ];

    let triangles = vec![
        // z = 0
        [0, 2, 1],
        [1, 2, 3],
        // z = 1
        [4, 5, 7],
        [4, 7, 6],
        // y = 0
        [0, 1, 4],
        [1, 5, 4],
        // y = 1
        [2, 7, 3],
        [2, 6, 7],
        // x = 0
        [0, 4, 2],
        [2, 4, 6],
        // x = 1
        [1, 3, 7],
        [1, 7, 5],
    ];

    TetMesh::from_parts(vertices, tetrahedra, triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_tet() -> TetMesh {
        TetMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 1, 2, 3]],
            vec![[0, 2, 1]],
        )
    }

    #[test]
    fn new_mesh_is_empty() {
        let mesh = TetMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.max_index(), None);
        assert!(mesh.has_valid_indices());
    }

    #[test]
    fn vertices_only_is_not_empty() {
        let mut mesh = TetMesh::new();
        mesh.vertices.push(Point3::origin());
        assert!(!mesh.is_empty());
    }

    #[test]
    fn single_tet_volume() {
        let mesh = single_tet();
        let vol = mesh.tetrahedron_signed_volume(0);
        assert!(vol.is_some());
        assert_relative_eq!(vol.unwrap_or_default(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn swapped_tet_is_negative() {
        let mut mesh = single_tet();
        mesh.tetrahedra[0].swap(0, 1);
        assert!(mesh.tetrahedron_signed_volume(0).is_some_and(|v| v < 0.0));
        assert_relative_eq!(mesh.volume(), 1.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn dangling_index_is_detected() {
        let mut mesh = single_tet();
        mesh.tetrahedra.push([0, 1, 2, 9]);
        assert_eq!(mesh.max_index(), Some(9));
        assert!(!mesh.has_valid_indices());
        assert_eq!(mesh.tetrahedron_signed_volume(1), None);
        assert_eq!(mesh.tetrahedron_signed_volume(5), None);
    }

    #[test]
    fn unit_cube_is_consistent() {
        let cube = unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert!(cube.has_valid_indices());
        for i in 0..cube.tetrahedron_count() {
            assert!(
                cube.tetrahedron_signed_volume(i).is_some_and(|v| v > 0.0),
                "tetrahedron {i} is inverted"
            );
        }
        assert_relative_eq!(cube.volume(), 1.0, epsilon = 1e-12);
    }
}
