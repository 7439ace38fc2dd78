//! PLY (Polygon File Format) input support.
//!
//! ASCII, binary little-endian and binary big-endian files are parsed with
//! `ply-rs`.
//!
//! # Supported Properties
//!
//! - Vertex positions (x, y, z) as `float` or `double` - required
//! - Face vertex indices (`vertex_indices` or `vertex_index`) - polygons
//!   are kept as facets, not triangulated
//!
//! # Example
//!
//! ```no_run
//! use volmesh_io::load_ply;
//!
//! let input = load_ply("scan.ply").unwrap();
//! println!("{} points, {} facets", input.point_count(), input.facet_count());
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use tracing::{info, warn};
use volmesh_types::{Facet, Point3, TetInput};

use crate::error::{IoError, IoResult};

/// Load a PLY file as a tetrahedralization input.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file is not valid PLY
/// - A vertex lacks `x`, `y` or `z`
/// - A face references a missing vertex
pub fn load_ply<P: AsRef<Path>>(path: P) -> IoResult<TetInput> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::on_open(path, e))?;
    let mut reader = BufReader::new(file);

    // Generic DefaultElement parser - works for all element types
    let parser = Parser::<DefaultElement>::new();

    let header = parser
        .read_header(&mut reader)
        .map_err(|e| IoError::invalid_content(format!("failed to parse PLY header: {e}")))?;

    let payload = parser
        .read_payload(&mut reader, &header)
        .map_err(|e| IoError::invalid_content(format!("failed to read PLY payload: {e}")))?;

    let mut input = TetInput::new();

    if let Some(vertex_elements) = payload.get("vertex") {
        input.points.reserve(vertex_elements.len());
        for (i, element) in vertex_elements.iter().enumerate() {
            let coord = |key: &str| {
                get_real_property(element, key).ok_or_else(|| {
                    IoError::invalid_content(format!("PLY vertex {i} has no '{key}' property"))
                })
            };
            input
                .points
                .push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
        }
    }

    if let Some(face_elements) = payload.get("face") {
        let point_count = input.point_count();
        input.facets.reserve(face_elements.len());
        let mut skipped = 0usize;

        for (i, element) in face_elements.iter().enumerate() {
            let indices = get_index_list(element);
            if indices.len() < 3 {
                skipped += 1;
                continue;
            }

            let vertices = indices
                .into_iter()
                .map(|index| {
                    usize::try_from(index)
                        .ok()
                        .filter(|&v| v < point_count)
                        .and_then(|v| u32::try_from(v).ok())
                        .ok_or_else(|| {
                            IoError::invalid_content(format!(
                                "PLY face {i} references vertex {index} of {point_count}"
                            ))
                        })
                })
                .collect::<IoResult<Vec<u32>>>()?;
            input.facets.push(Facet::new(vertices, 0));
        }

        if skipped > 0 {
            warn!(skipped, "Ignored PLY faces with fewer than 3 vertices");
        }
    }

    info!(
        path = %path.display(),
        points = input.point_count(),
        facets = input.facet_count(),
        "Loaded PLY"
    );
    Ok(input)
}

/// Extract a real-valued property from a PLY element.
fn get_real_property(element: &DefaultElement, key: &str) -> Option<f64> {
    match element.get(key)? {
        Property::Float(v) => Some(f64::from(*v)),
        Property::Double(v) => Some(*v),
        _ => None,
    }
}

/// Extract the vertex index list from a face element.
fn get_index_list(element: &DefaultElement) -> Vec<i64> {
    // Try common property names for face indices
    for key in &["vertex_indices", "vertex_index"] {
        if let Some(prop) = element.get(*key) {
            return match prop {
                Property::ListInt(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListUInt(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListUChar(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListChar(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListShort(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListUShort(v) => v.iter().map(|&i| i64::from(i)).collect(),
                _ => continue,
            };
        }
    }
    Vec::new()
}
