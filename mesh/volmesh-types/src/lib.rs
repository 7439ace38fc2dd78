//! Core volume mesh types.
//!
//! This crate provides the in-memory containers shared by volume mesh
//! readers and writers:
//!
//! - [`TetMesh`] - A tetrahedral volume mesh with its boundary triangles
//! - [`TetInput`] - Input for a tetrahedralizer (points, polygonal facets,
//!   optional tetrahedra, edges and volume constraints)
//! - [`Facet`] - A single polygon of a piecewise linear complex
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **no I/O and no rendering dependencies**.
//! File formats live in `volmesh-io`.
//!
//! # Indexing
//!
//! All indices stored in these types are **0-based** positions into the
//! vertex (point) array. File formats that count from 1 are shifted by
//! their readers and writers.
//!
//! # Example
//!
//! ```
//! use volmesh_types::{Point3, TetMesh};
//!
//! let mut mesh = TetMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
//! mesh.vertices.push(Point3::new(0.0, 0.0, 1.0));
//! mesh.tetrahedra.push([0, 1, 2, 3]);
//! mesh.triangles.push([0, 2, 1]);
//!
//! assert_eq!(mesh.tetrahedron_count(), 1);
//! assert!(mesh.has_valid_indices());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod input;
mod tet_mesh;

pub use input::{Facet, TetInput};
pub use tet_mesh::{unit_cube, TetMesh};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
