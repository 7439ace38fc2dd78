//! TetGen `.node` / `.ele` / `.face` / `.edge` / `.vol` support.
//!
//! A TetGen mesh is a collection of files sharing a basename. Only the
//! `.node` file is mandatory; the others are read when present.
//!
//! # File Layouts
//!
//! ```text
//! .node   <#points> <dim=3> <#attributes> <#markers 0|1>
//!         <index> <x> <y> <z> [attributes] [marker]
//! .ele    <#tets> <nodes per tet (4 or 10)> <#attributes>
//!         <index> <n1> <n2> <n3> <n4> [n5..n10] [attributes]
//! .face   <#faces> <#markers 0|1>
//!         <index> <n1> <n2> <n3> [marker]
//! .edge   <#edges> <#markers 0|1>
//!         <index> <n1> <n2> [marker]
//! .vol    <#tets>
//!         <index> <max volume>
//! ```
//!
//! `#` starts a comment and blank lines are ignored. The index of the first
//! point fixes the numbering base (0 or 1) for the whole collection; all
//! indices are stored 0-based.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use volmesh_types::{Facet, Point3, TetInput};

use crate::error::{IoError, IoResult};
use crate::{data_lines, MAX_PREALLOCATED_ROWS};

/// Load a TetGen collection from its basename.
///
/// Reads `<basename>.node` and, when they exist, `<basename>.ele`,
/// `<basename>.face`, `<basename>.edge` and `<basename>.vol`.
///
/// # Errors
///
/// Returns an error if:
/// - `<basename>.node` does not exist ([`IoError::FileNotFound`])
/// - Any present file is malformed or references a missing point
/// - `.vol` does not hold one constraint per tetrahedron
///
/// # Example
///
/// ```no_run
/// use volmesh_io::load_tetgen;
///
/// // Reads bunny.node, bunny.ele, bunny.face, ...
/// let input = load_tetgen("bunny").unwrap();
/// println!("{} points, {} tets", input.point_count(), input.tetrahedra.len());
/// ```
pub fn load_tetgen<P: AsRef<Path>>(basename: P) -> IoResult<TetInput> {
    let basename = basename.as_ref();
    let node_path = with_suffix(basename, "node");
    let text = std::fs::read_to_string(&node_path).map_err(|e| IoError::on_open(&node_path, e))?;

    let mut input = TetInput::new();
    let first = parse_node(&text, &mut input)?;

    if let Some(text) = read_optional(&with_suffix(basename, "ele"))? {
        parse_ele(&text, first, &mut input)?;
    }
    if let Some(text) = read_optional(&with_suffix(basename, "face"))? {
        parse_face(&text, first, &mut input)?;
    }
    if let Some(text) = read_optional(&with_suffix(basename, "edge"))? {
        parse_edge(&text, first, &mut input)?;
    }
    if let Some(text) = read_optional(&with_suffix(basename, "vol"))? {
        parse_vol(&text, &mut input)?;
    }

    info!(
        basename = %basename.display(),
        points = input.point_count(),
        facets = input.facet_count(),
        tetrahedra = input.tetrahedra.len(),
        edges = input.edges.len(),
        "Loaded TetGen collection"
    );
    Ok(input)
}

/// Load the point set of a single TetGen `.node` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is malformed.
pub fn load_node<P: AsRef<Path>>(path: P) -> IoResult<TetInput> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| IoError::on_open(path, e))?;
    let mut input = TetInput::new();
    parse_node(&text, &mut input)?;

    info!(path = %path.display(), points = input.point_count(), "Loaded TetGen nodes");
    Ok(input)
}

/// `<basename>.<ext>` without touching any existing extension of `basename`.
fn with_suffix(basename: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(basename.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn read_optional(path: &Path) -> IoResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(IoError::Io(e)),
    }
}

/// Header field `i`, or `default` when the header is shorter.
fn header_field(header: &[&str], i: usize, default: usize) -> IoResult<usize> {
    match header.get(i) {
        Some(s) => Ok(s.parse::<usize>()?),
        None => Ok(default),
    }
}

/// Fetch token `i` of a row or fail with the row's context.
fn field<'a>(row: &[&'a str], i: usize, context: &str) -> IoResult<&'a str> {
    row.get(i).copied().ok_or_else(|| {
        IoError::invalid_content(format!("{context}: expected at least {} fields", i + 1))
    })
}

/// Convert a file index to a 0-based point index.
fn point_index(raw: &str, first: i64, point_count: usize, context: &str) -> IoResult<u32> {
    let raw: i64 = raw.parse()?;
    raw.checked_sub(first)
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i < point_count)
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| {
            IoError::invalid_content(format!(
                "{context}: point {raw} is outside {first}..{}",
                first.saturating_add(i64::try_from(point_count).unwrap_or(i64::MAX))
            ))
        })
}

/// Parse a `.node` file into `input.points` and return the numbering base.
fn parse_node(text: &str, input: &mut TetInput) -> IoResult<i64> {
    let mut lines = data_lines(text);
    let header = lines
        .next()
        .ok_or_else(|| IoError::unexpected_eof(".node header"))?;

    let count = header_field(&header, 0, 0)?;
    let dim = header_field(&header, 1, 3)?;
    let attributes = header_field(&header, 2, 0)?;
    let markers = header_field(&header, 3, 0)?;

    if dim != 3 && dim != 0 {
        return Err(IoError::invalid_content(format!(
            ".node: only 3D points are supported, got dimension {dim}"
        )));
    }

    let mut first = 0;
    input.points.reserve(count.min(MAX_PREALLOCATED_ROWS));
    for i in 0..count {
        let row = lines
            .next()
            .ok_or_else(|| IoError::unexpected_eof(format!(".node point {i} of {count}")))?;
        let context = ".node";

        let index: i64 = field(&row, 0, context)?.parse()?;
        if i == 0 {
            first = index;
        }
        let x: f64 = field(&row, 1, context)?.parse()?;
        let y: f64 = field(&row, 2, context)?.parse()?;
        let z: f64 = field(&row, 3, context)?.parse()?;
        input.points.push(Point3::new(x, y, z));

        if attributes > 0 {
            let values = (0..attributes)
                .map(|a| -> IoResult<f64> { Ok(field(&row, 4 + a, context)?.parse()?) })
                .collect::<IoResult<Vec<f64>>>()?;
            input.point_attributes.push(values);
        }
        if markers > 0 {
            let marker: i32 = field(&row, 4 + attributes, context)?.parse()?;
            input.point_markers.push(marker);
        }
    }

    debug!(points = count, first, attributes, markers, "Parsed .node");
    Ok(first)
}

fn parse_ele(text: &str, first: i64, input: &mut TetInput) -> IoResult<()> {
    let mut lines = data_lines(text);
    let header = lines
        .next()
        .ok_or_else(|| IoError::unexpected_eof(".ele header"))?;

    let count = header_field(&header, 0, 0)?;
    let corners = header_field(&header, 1, 4)?;
    let attributes = header_field(&header, 2, 0)?;

    if corners < 4 {
        return Err(IoError::invalid_content(format!(
            ".ele: tetrahedra need at least 4 nodes, header says {corners}"
        )));
    }
    if corners > 4 {
        warn!(nodes = corners, "Keeping only the 4 corner nodes of each tetrahedron");
    }

    let points = input.point_count();
    input.tetrahedra.reserve(count.min(MAX_PREALLOCATED_ROWS));
    for i in 0..count {
        let row = lines
            .next()
            .ok_or_else(|| IoError::unexpected_eof(format!(".ele tetrahedron {i} of {count}")))?;
        let context = ".ele";

        let mut tet = [0u32; 4];
        for (k, slot) in tet.iter_mut().enumerate() {
            *slot = point_index(field(&row, 1 + k, context)?, first, points, context)?;
        }
        input.tetrahedra.push(tet);

        if attributes > 0 {
            let values = (0..attributes)
                .map(|a| -> IoResult<f64> {
                    Ok(field(&row, 1 + corners + a, context)?.parse()?)
                })
                .collect::<IoResult<Vec<f64>>>()?;
            input.tetrahedron_attributes.push(values);
        }
    }

    debug!(tetrahedra = count, attributes, "Parsed .ele");
    Ok(())
}

fn parse_face(text: &str, first: i64, input: &mut TetInput) -> IoResult<()> {
    let mut lines = data_lines(text);
    let header = lines
        .next()
        .ok_or_else(|| IoError::unexpected_eof(".face header"))?;

    let count = header_field(&header, 0, 0)?;
    let markers = header_field(&header, 1, 0)?;

    let points = input.point_count();
    input.facets.reserve(count.min(MAX_PREALLOCATED_ROWS));
    for i in 0..count {
        let row = lines
            .next()
            .ok_or_else(|| IoError::unexpected_eof(format!(".face triangle {i} of {count}")))?;
        let context = ".face";

        let a = point_index(field(&row, 1, context)?, first, points, context)?;
        let b = point_index(field(&row, 2, context)?, first, points, context)?;
        let c = point_index(field(&row, 3, context)?, first, points, context)?;
        let marker = if markers > 0 {
            field(&row, 4, context)?.parse()?
        } else {
            0
        };
        input.facets.push(Facet::new(vec![a, b, c], marker));
    }

    debug!(faces = count, markers, "Parsed .face");
    Ok(())
}

fn parse_edge(text: &str, first: i64, input: &mut TetInput) -> IoResult<()> {
    let mut lines = data_lines(text);
    let header = lines
        .next()
        .ok_or_else(|| IoError::unexpected_eof(".edge header"))?;

    let count = header_field(&header, 0, 0)?;
    let markers = header_field(&header, 1, 0)?;

    let points = input.point_count();
    input.edges.reserve(count.min(MAX_PREALLOCATED_ROWS));
    for i in 0..count {
        let row = lines
            .next()
            .ok_or_else(|| IoError::unexpected_eof(format!(".edge {i} of {count}")))?;
        let context = ".edge";

        let a = point_index(field(&row, 1, context)?, first, points, context)?;
        let b = point_index(field(&row, 2, context)?, first, points, context)?;
        input.edges.push([a, b]);
        if markers > 0 {
            input.edge_markers.push(field(&row, 3, context)?.parse()?);
        }
    }

    debug!(edges = count, markers, "Parsed .edge");
    Ok(())
}

fn parse_vol(text: &str, input: &mut TetInput) -> IoResult<()> {
    let mut lines = data_lines(text);
    let header = lines
        .next()
        .ok_or_else(|| IoError::unexpected_eof(".vol header"))?;

    let count = header_field(&header, 0, 0)?;
    if count != input.tetrahedra.len() {
        return Err(IoError::invalid_content(format!(
            ".vol: {count} constraints for {} tetrahedra",
            input.tetrahedra.len()
        )));
    }

    input.volume_constraints.reserve(count.min(MAX_PREALLOCATED_ROWS));
    for i in 0..count {
        let row = lines
            .next()
            .ok_or_else(|| IoError::unexpected_eof(format!(".vol constraint {i} of {count}")))?;
        input.volume_constraints.push(field(&row, 1, ".vol")?.parse()?);
    }

    debug!(constraints = count, "Parsed .vol");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    const NODE_ONE_BASED: &str = "\
# unit tetrahedron
4 3 0 1
1 0.0 0.0 0.0 1
2 1.0 0.0 0.0 1
3 0.0 1.0 0.0 0   # interior
4 0.0 0.0 1.0 2
";

    #[test]
    fn node_sets_numbering_base() {
        let mut input = TetInput::new();
        let first = parse_node(NODE_ONE_BASED, &mut input).unwrap();
        assert_eq!(first, 1);
        assert_eq!(input.point_count(), 4);
        assert_eq!(input.points[3], Point3::new(0.0, 0.0, 1.0));
        assert_eq!(input.point_markers, vec![1, 1, 0, 2]);
        assert!(input.point_attributes.is_empty());
    }

    #[test]
    fn node_reads_attributes() {
        let text = "2 3 2 0\n0 0 0 0 0.5 7\n1 1 1 1 0.25 8\n";
        let mut input = TetInput::new();
        let first = parse_node(text, &mut input).unwrap();
        assert_eq!(first, 0);
        assert_eq!(input.point_attributes, vec![vec![0.5, 7.0], vec![0.25, 8.0]]);
        assert!(input.point_markers.is_empty());
    }

    #[test]
    fn node_rejects_2d() {
        let mut input = TetInput::new();
        let err = parse_node("1 2 0 0\n0 0 0\n", &mut input).unwrap_err();
        assert!(matches!(err, IoError::InvalidContent { .. }));
    }

    #[test]
    fn node_truncated() {
        let mut input = TetInput::new();
        let err = parse_node("3 3 0 0\n0 0 0 0\n", &mut input).unwrap_err();
        assert!(matches!(err, IoError::UnexpectedEof { .. }));
    }

    #[test]
    fn ele_shifts_and_truncates_quadratic_tets() {
        let mut input = TetInput::new();
        let first = parse_node(NODE_ONE_BASED, &mut input).unwrap();
        // 10-node tetrahedron: extra nodes are ignored (they reuse corners here).
        parse_ele("1 10 1\n1 1 2 3 4 1 1 1 1 1 1 3.5\n", first, &mut input).unwrap();
        assert_eq!(input.tetrahedra, vec![[0, 1, 2, 3]]);
        assert_eq!(input.tetrahedron_attributes, vec![vec![3.5]]);
    }

    #[test]
    fn ele_rejects_missing_point() {
        let mut input = TetInput::new();
        let first = parse_node(NODE_ONE_BASED, &mut input).unwrap();
        let err = parse_ele("1 4 0\n1 1 2 3 5\n", first, &mut input).unwrap_err();
        assert!(matches!(err, IoError::InvalidContent { .. }));

        // 0 is below the 1-based numbering.
        let err = parse_ele("1 4 0\n1 0 1 2 3\n", first, &mut input).unwrap_err();
        assert!(matches!(err, IoError::InvalidContent { .. }));
    }

    #[test]
    fn face_reads_markers() {
        let mut input = TetInput::new();
        let first = parse_node(NODE_ONE_BASED, &mut input).unwrap();
        parse_face("2 1\n1 1 3 2 5\n2 1 2 4 -1\n", first, &mut input).unwrap();
        assert_eq!(input.facets[0], Facet::new(vec![0, 2, 1], 5));
        assert_eq!(input.facets[1], Facet::new(vec![0, 1, 3], -1));
    }

    #[test]
    fn edge_and_vol() {
        let mut input = TetInput::new();
        let first = parse_node(NODE_ONE_BASED, &mut input).unwrap();
        parse_ele("1 4 0\n1 1 2 3 4\n", first, &mut input).unwrap();
        parse_edge("1 1\n1 1 4 9\n", first, &mut input).unwrap();
        parse_vol("1\n1 0.01\n", &mut input).unwrap();

        assert_eq!(input.edges, vec![[0, 3]]);
        assert_eq!(input.edge_markers, vec![9]);
        assert_eq!(input.volume_constraints, vec![0.01]);
    }

    #[test]
    fn vol_count_must_match() {
        let mut input = TetInput::new();
        let err = parse_vol("2\n1 0.1\n2 0.2\n", &mut input).unwrap_err();
        assert!(matches!(err, IoError::InvalidContent { .. }));
    }

    #[test]
    fn suffix_keeps_dots_in_basename() {
        let path = with_suffix(Path::new("out/model.v2"), "node");
        assert_eq!(path, PathBuf::from("out/model.v2.node"));
    }

    #[test]
    fn collection_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("tet");
        std::fs::write(with_suffix(&base, "node"), NODE_ONE_BASED).unwrap();
        std::fs::write(with_suffix(&base, "ele"), "1 4 0\n1 1 2 3 4\n").unwrap();

        let input = load_tetgen(&base).unwrap();
        assert_eq!(input.point_count(), 4);
        assert_eq!(input.tetrahedra.len(), 1);
        assert!(input.facets.is_empty());
        assert!(input.edges.is_empty());
    }

    #[test]
    fn collection_requires_node() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tetgen(dir.path().join("absent")).unwrap_err();
        match err {
            IoError::FileNotFound { path } => {
                assert!(path.to_string_lossy().ends_with("absent.node"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
