//! OFF (Object File Format) support.
//!
//! ```text
//! OFF
//! <#vertices> <#faces> <#edges>
//! x y z                      (one line per vertex)
//! n i0 i1 ... i(n-1) [rgb]   (one line per face, 0-based)
//! ```
//!
//! Header variants (`COFF`, `NOFF`, `CNOFF`, ...) are accepted; per-vertex
//! colors and normals after the first three coordinates and per-face colors
//! after the index list are ignored. The counts may share the header line.

use std::path::Path;

use tracing::{debug, info};
use volmesh_types::{Facet, Point3, TetInput};

use crate::error::{IoError, IoResult};
use crate::{data_lines, MAX_PREALLOCATED_ROWS};

/// Load an OFF file as a tetrahedralization input.
///
/// Every face becomes a polygonal facet with marker 0.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the header is not an OFF
/// header, a section is truncated, or a face references a missing vertex.
pub fn load_off<P: AsRef<Path>>(path: P) -> IoResult<TetInput> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| IoError::on_open(path, e))?;
    let input = parse_off(&text)?;

    info!(
        path = %path.display(),
        points = input.point_count(),
        facets = input.facet_count(),
        "Loaded OFF"
    );
    Ok(input)
}

/// Parse OFF text.
///
/// # Errors
///
/// See [`load_off`].
///
/// # Example
///
/// ```
/// use volmesh_io::parse_off;
///
/// let text = "OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";
/// let input = parse_off(text).unwrap();
/// assert_eq!(input.facets[0].vertices, vec![0, 1, 2]);
/// ```
pub fn parse_off(text: &str) -> IoResult<TetInput> {
    let mut lines = data_lines(text);

    let header = lines
        .next()
        .ok_or_else(|| IoError::unexpected_eof("OFF header"))?;
    if !header[0].ends_with("OFF") {
        return Err(IoError::invalid_content(format!(
            "expected OFF header, found '{}'",
            header[0]
        )));
    }

    // Counts either follow the keyword or sit on the next line.
    let counts = if header.len() > 1 {
        header[1..].to_vec()
    } else {
        lines
            .next()
            .ok_or_else(|| IoError::unexpected_eof("OFF counts"))?
    };
    if counts.len() < 2 {
        return Err(IoError::invalid_content("OFF counts need vertex and face totals"));
    }
    let vertex_count: usize = counts[0].parse()?;
    let face_count: usize = counts[1].parse()?;

    let mut input = TetInput::new();
    input.points.reserve(vertex_count.min(MAX_PREALLOCATED_ROWS));
    for i in 0..vertex_count {
        let row = lines
            .next()
            .ok_or_else(|| IoError::unexpected_eof(format!("OFF vertex {i} of {vertex_count}")))?;
        if row.len() < 3 {
            return Err(IoError::invalid_content(format!(
                "OFF vertex {i} has {} coordinates",
                row.len()
            )));
        }
        let x: f64 = row[0].parse()?;
        let y: f64 = row[1].parse()?;
        let z: f64 = row[2].parse()?;
        input.points.push(Point3::new(x, y, z));
    }

    input.facets.reserve(face_count.min(MAX_PREALLOCATED_ROWS));
    for i in 0..face_count {
        let row = lines
            .next()
            .ok_or_else(|| IoError::unexpected_eof(format!("OFF face {i} of {face_count}")))?;
        let corners: usize = row[0].parse()?;
        if row.len() <= corners {
            return Err(IoError::invalid_content(format!(
                "OFF face {i} declares {corners} corners but lists {}",
                row.len() - 1
            )));
        }

        let vertices = row[1..=corners]
            .iter()
            .map(|s| -> IoResult<u32> {
                let index: u32 = s.parse()?;
                if (index as usize) < vertex_count {
                    Ok(index)
                } else {
                    Err(IoError::invalid_content(format!(
                        "OFF face {i} references vertex {index} of {vertex_count}"
                    )))
                }
            })
            .collect::<IoResult<Vec<u32>>>()?;
        input.facets.push(Facet::new(vertices, 0));
    }

    debug!(vertex_count, face_count, "Parsed OFF");
    Ok(input)
}
