//! Volume mesh file I/O.
//!
//! This crate writes tetrahedral meshes and reads tetrahedralization inputs:
//!
//! - **MEDIT** (`.mesh`) - ASCII writer (vertices, surface triangles,
//!   tetrahedra) and a tolerant reader
//! - **TetGen** (`.node`, `.ele`, `.face`, `.edge`, `.vol`) - collection reader
//! - **OFF** (Object File Format) - ASCII polygon reader
//! - **PLY** (Polygon File Format) - ASCII and binary polygon reader
//! - **OBJ** (Wavefront) - polygon reader
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **no rendering dependencies**. Logging goes
//! through `tracing`; install a subscriber to see it.
//!
//! # Example
//!
//! ```no_run
//! use volmesh_io::{load_tet_input, save_medit};
//!
//! // Format detected from the .off extension
//! let input = load_tet_input("bunny.off").unwrap();
//!
//! // ... tetrahedralize ...
//! # let mesh = input.into_tet_mesh();
//! save_medit(&mesh, "bunny.mesh").unwrap();
//! ```
//!
//! # Legacy List Interface
//!
//! [`write_mesh`] takes `Vec<Vec<_>>` containers and returns a success flag.
//! Jagged containers are rejected before the destination is opened.
//!
//! ```no_run
//! use volmesh_io::write_mesh;
//!
//! let v = vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
//! let t = vec![vec![0, 1, 2, 3]];
//! let f = vec![vec![0, 1, 2]];
//! assert!(write_mesh("tet.mesh", &v, &t, &f));
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod medit;
mod obj;
mod off;
mod params;
mod ply;
mod real;
mod shape;
mod tetgen;

pub use error::{IoError, IoResult};
pub use medit::{
    load_medit, parse_medit, save_medit, save_medit_lists, save_medit_lists_with,
    save_medit_with, write_medit, write_mesh,
};
pub use obj::load_obj;
pub use off::{load_off, parse_off};
pub use params::MeditParams;
pub use ply::load_ply;
pub use real::Real;
pub use shape::to_fixed_rows;
pub use tetgen::{load_node, load_tetgen};

use std::path::Path;

use volmesh_types::{TetInput, TetMesh};

/// Upper bound on rows pre-allocated from a count declared in a file.
pub(crate) const MAX_PREALLOCATED_ROWS: usize = 1 << 20;

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// OFF (Object File Format).
    Off,
    /// PLY (Polygon File Format), ASCII or binary.
    Ply,
    /// TetGen `.node` point set.
    Node,
    /// MEDIT `.mesh` volume mesh.
    Medit,
    /// OBJ (Wavefront).
    Obj,
}

impl InputFormat {
    /// Detect format from file extension.
    ///
    /// # Returns
    ///
    /// The detected format, or `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "off" => Some(Self::Off),
            "ply" => Some(Self::Ply),
            "node" => Some(Self::Node),
            "mesh" => Some(Self::Medit),
            "obj" => Some(Self::Obj),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Ply => "ply",
            Self::Node => "node",
            Self::Medit => "mesh",
            Self::Obj => "obj",
        }
    }
}

/// Load a mesh or point set into a tetrahedralization input.
///
/// The format is detected from the extension. A path without a recognized
/// extension is treated as the basename of a TetGen collection
/// (`<path>.node` required; `.ele`, `.face`, `.edge`, `.vol` optional).
///
/// # Errors
///
/// Returns an error if:
/// - The file (or `<path>.node` for a basename) does not exist
/// - The file content is invalid for the detected format
///
/// # Example
///
/// ```no_run
/// use volmesh_io::load_tet_input;
///
/// let from_ply = load_tet_input("scan.ply").unwrap();
/// let from_tetgen = load_tet_input("out/bunny.1").unwrap(); // bunny.1.node, bunny.1.ele, ...
/// ```
pub fn load_tet_input<P: AsRef<Path>>(path: P) -> IoResult<TetInput> {
    let path = path.as_ref();
    match InputFormat::from_path(path) {
        Some(InputFormat::Off) => load_off(path),
        Some(InputFormat::Ply) => load_ply(path),
        Some(InputFormat::Node) => load_node(path),
        Some(InputFormat::Medit) => load_medit(path).map(TetInput::from),
        Some(InputFormat::Obj) => load_obj(path),
        None => load_tetgen(path),
    }
}

/// Save a tetrahedral mesh, choosing the format from the extension.
///
/// Only MEDIT (`.mesh`, any case) can hold a volume mesh.
///
/// # Errors
///
/// Returns [`IoError::UnknownFormat`] for any other extension (nothing is
/// written), otherwise the errors of [`save_medit`].
pub fn save_tet_mesh<P: AsRef<Path>>(mesh: &TetMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match InputFormat::from_path(path) {
        Some(InputFormat::Medit) => save_medit(mesh, path),
        _ => Err(IoError::UnknownFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string(),
        }),
    }
}

/// Non-empty, comment-stripped (`#`) lines split into tokens.
pub(crate) fn data_lines(text: &str) -> impl Iterator<Item = Vec<&str>> {
    text.lines().filter_map(|line| {
        let data = line.split_once('#').map_or(line, |(data, _)| data);
        let tokens: Vec<&str> = data.split_whitespace().collect();
        (!tokens.is_empty()).then_some(tokens)
    })
}
