//! MEDIT `.mesh` (ASCII) support.
//!
//! MEDIT is a plain-text volume mesh format made of labeled sections, each
//! followed by an element count and one row per element. Indices are
//! 1-based and every row ends with an integer reference (marker).
//!
//! # Written Layout
//!
//! ```text
//! MeshVersionFormatted 1
//! Dimension 3
//! Vertices
//! N
//! x y z ref            (N rows)
//! Triangles
//! F
//! a b c ref            (F rows)
//! Tetrahedra
//! T
//! a b c d ref          (T rows)
//! ```
//!
//! Coordinates are written with [`Real`] (`%g` look, round-trip digits).
//! Indices are written as stored index + 1 without any bounds check unless
//! [`MeditParams::check_indices`] is set.
//!
//! # Reading
//!
//! The reader accepts the above plus common variants: `#` comments,
//! arbitrary whitespace, case-insensitive keywords, an `End` marker, and
//! sections it does not keep (`Edges`, `Quadrilaterals`, `Hexahedra`,
//! `Corners`, `Ridges`, `RequiredVertices`, `RequiredEdges`, `Normals`,
//! `Tangents`), which are skipped.
//!
//! # Example
//!
//! ```no_run
//! use volmesh_io::{load_medit, save_medit};
//! use volmesh_types::unit_cube;
//!
//! save_medit(&unit_cube(), "cube.mesh").unwrap();
//! let mesh = load_medit("cube.mesh").unwrap();
//! assert_eq!(mesh.tetrahedron_count(), 5);
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, error, info, warn};
use volmesh_types::{Point3, TetMesh};

use crate::error::{IoError, IoResult};
use crate::params::MeditParams;
use crate::real::Real;
use crate::shape::to_fixed_rows;
use crate::MAX_PREALLOCATED_ROWS;

/// Save a tetrahedral mesh to a MEDIT `.mesh` file with default parameters.
///
/// Creates or truncates `path`.
///
/// # Errors
///
/// Returns [`IoError::CouldNotOpen`] if the file cannot be created, or
/// [`IoError::Io`] if writing fails part-way (for example, disk full).
pub fn save_medit<P: AsRef<Path>>(mesh: &TetMesh, path: P) -> IoResult<()> {
    save_medit_with(mesh, path, &MeditParams::default())
}

/// Save a tetrahedral mesh to a MEDIT `.mesh` file.
///
/// # Errors
///
/// As [`save_medit`], plus [`IoError::IndexOutOfRange`] (before the file is
/// touched) when `params.check_indices` is set and an element references a
/// missing vertex.
pub fn save_medit_with<P: AsRef<Path>>(
    mesh: &TetMesh,
    path: P,
    params: &MeditParams,
) -> IoResult<()> {
    save_rows(
        path.as_ref(),
        &mesh.vertices,
        &mesh.tetrahedra,
        &mesh.triangles,
        params,
    )
}

/// Save list-of-rows containers to a MEDIT `.mesh` file.
///
/// `vertices` rows must hold 3 coordinates, `tetrahedra` rows 4 indices and
/// `triangles` rows 3 indices. Indices are 0-based, may be of any primitive
/// integer type, and may be negative or out of range; they are written
/// shifted by one without validation.
///
/// # Errors
///
/// - [`IoError::JaggedRows`] / [`IoError::RowArity`] if a container is not
///   rectangular with the expected width; nothing is opened or written
/// - [`IoError::IndexOverflow`] if an index does not fit in `i64` (only
///   possible for `u64`, `usize` or `u128` rows); nothing is opened or written
/// - [`IoError::CouldNotOpen`] / [`IoError::Io`] as for [`save_medit`]
///
/// # Example
///
/// ```no_run
/// use volmesh_io::save_medit_lists;
///
/// let v = vec![
///     vec![0.0, 0.0, 0.0],
///     vec![1.0, 0.0, 0.0],
///     vec![0.0, 1.0, 0.0],
///     vec![0.0, 0.0, 1.0],
/// ];
/// let t = vec![vec![0, 1, 2, 3]];
/// let f = vec![vec![0, 1, 2]];
/// save_medit_lists(&v, &t, &f, "tet.mesh").unwrap();
/// ```
pub fn save_medit_lists<S, I, RV, RI, P>(
    vertices: &[RV],
    tetrahedra: &[RI],
    triangles: &[RI],
    path: P,
) -> IoResult<()>
where
    S: Copy + Into<f64>,
    I: Copy + TryInto<i64>,
    RV: AsRef<[S]>,
    RI: AsRef<[I]>,
    P: AsRef<Path>,
{
    save_medit_lists_with(vertices, tetrahedra, triangles, path, &MeditParams::default())
}

/// Save list-of-rows containers to a MEDIT `.mesh` file with parameters.
///
/// # Errors
///
/// As [`save_medit_lists`], plus [`IoError::IndexOutOfRange`] when
/// `params.check_indices` is set.
pub fn save_medit_lists_with<S, I, RV, RI, P>(
    vertices: &[RV],
    tetrahedra: &[RI],
    triangles: &[RI],
    path: P,
    params: &MeditParams,
) -> IoResult<()>
where
    S: Copy + Into<f64>,
    I: Copy + TryInto<i64>,
    RV: AsRef<[S]>,
    RI: AsRef<[I]>,
    P: AsRef<Path>,
{
    let vertices: Vec<[S; 3]> = to_fixed_rows(vertices, "vertices")?;
    let tetrahedra: Vec<[I; 4]> = to_fixed_rows(tetrahedra, "tetrahedra")?;
    let triangles: Vec<[I; 3]> = to_fixed_rows(triangles, "triangles")?;
    let tetrahedra = widen_indices(tetrahedra, "tetrahedra")?;
    let triangles = widen_indices(triangles, "triangles")?;

    let vertices: Vec<Point3<f64>> = vertices
        .into_iter()
        .map(|[x, y, z]| Point3::new(x.into(), y.into(), z.into()))
        .collect();

    save_rows(path.as_ref(), &vertices, &tetrahedra, &triangles, params)
}

/// Write list-of-rows containers to `path`, reporting only success.
///
/// This is the flag-returning form of [`save_medit_lists`]: every failure
/// (jagged input, unopenable path, failed write) is logged with
/// `tracing::error!` and turned into `false`.
///
/// # Example
///
/// ```no_run
/// use volmesh_io::write_mesh;
///
/// let v = vec![vec![0.0, 0.0, 0.0], vec![1.0, 0.0]];
/// let t: Vec<Vec<i32>> = Vec::new();
/// assert!(!write_mesh("bad.mesh", &v, &t, &t));
/// ```
#[must_use]
pub fn write_mesh<P, S, I, RV, RI>(
    path: P,
    vertices: &[RV],
    tetrahedra: &[RI],
    triangles: &[RI],
) -> bool
where
    P: AsRef<Path>,
    S: Copy + Into<f64>,
    I: Copy + TryInto<i64>,
    RV: AsRef<[S]>,
    RI: AsRef<[I]>,
{
    let path = path.as_ref();
    match save_medit_lists(vertices, tetrahedra, triangles, path) {
        Ok(()) => true,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to write MEDIT mesh");
            false
        }
    }
}

/// Write a tetrahedral mesh as a MEDIT document to any writer.
///
/// # Errors
///
/// Returns [`IoError::Io`] on write failure, or [`IoError::IndexOutOfRange`]
/// when `params.check_indices` is set and an element references a missing
/// vertex (nothing is written in that case).
pub fn write_medit<W: Write>(writer: &mut W, mesh: &TetMesh, params: &MeditParams) -> IoResult<()> {
    if params.check_indices {
        check_indices(&mesh.tetrahedra, mesh.vertices.len(), "tetrahedra")?;
        check_indices(&mesh.triangles, mesh.vertices.len(), "triangles")?;
    }
    write_document(
        writer,
        &mesh.vertices,
        &mesh.tetrahedra,
        &mesh.triangles,
        params,
    )
}

/// Validate (if asked), create `path`, write the document and flush it.
fn save_rows<I>(
    path: &Path,
    vertices: &[Point3<f64>],
    tetrahedra: &[[I; 4]],
    triangles: &[[I; 3]],
    params: &MeditParams,
) -> IoResult<()>
where
    I: Copy + Into<i64>,
{
    if params.check_indices {
        check_indices(tetrahedra, vertices.len(), "tetrahedra")?;
        check_indices(triangles, vertices.len(), "triangles")?;
    }

    let mut writer = create(path)?;
    write_document(&mut writer, vertices, tetrahedra, triangles, params)?;
    // Late write errors (disk full) surface here, not on drop.
    writer.flush()?;

    info!(
        path = %path.display(),
        vertices = vertices.len(),
        triangles = triangles.len(),
        tetrahedra = tetrahedra.len(),
        "Wrote MEDIT mesh"
    );
    Ok(())
}

/// Convert index rows of any integer type to `i64` rows.
fn widen_indices<I, const N: usize>(
    rows: Vec<[I; N]>,
    container: &'static str,
) -> IoResult<Vec<[i64; N]>>
where
    I: Copy + TryInto<i64>,
{
    rows.into_iter()
        .enumerate()
        .map(|(row, indices)| -> IoResult<[i64; N]> {
            let mut wide = [0i64; N];
            for (slot, index) in wide.iter_mut().zip(indices) {
                *slot = index
                    .try_into()
                    .map_err(|_| IoError::IndexOverflow { container, row })?;
            }
            Ok(wide)
        })
        .collect()
}

/// Open `path` for writing, truncating any existing file.
fn create(path: &Path) -> IoResult<BufWriter<File>> {
    let file = File::create(path).map_err(|source| IoError::CouldNotOpen {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

/// Shift a stored 0-based index to MEDIT's 1-based numbering.
fn one_based<I: Into<i64>>(index: I) -> i64 {
    index.into().wrapping_add(1)
}

/// Verify every index of every row addresses an existing vertex.
fn check_indices<I, const N: usize>(
    rows: &[[I; N]],
    vertex_count: usize,
    container: &'static str,
) -> IoResult<()>
where
    I: Copy + Into<i64>,
{
    for (row, indices) in rows.iter().enumerate() {
        for &index in indices {
            let index: i64 = index.into();
            let in_range = usize::try_from(index).is_ok_and(|i| i < vertex_count);
            if !in_range {
                return Err(IoError::IndexOutOfRange {
                    container,
                    row,
                    index,
                    vertex_count,
                });
            }
        }
    }
    Ok(())
}

fn write_document<W, I>(
    writer: &mut W,
    vertices: &[Point3<f64>],
    tetrahedra: &[[I; 4]],
    triangles: &[[I; 3]],
    params: &MeditParams,
) -> IoResult<()>
where
    W: Write,
    I: Copy + Into<i64>,
{
    let reference = params.reference;

    writeln!(writer, "MeshVersionFormatted 1")?;
    writeln!(writer, "Dimension 3")?;

    writeln!(writer, "Vertices")?;
    writeln!(writer, "{}", vertices.len())?;
    for p in vertices {
        writeln!(
            writer,
            "{} {} {} {reference}",
            Real(p.x),
            Real(p.y),
            Real(p.z)
        )?;
    }

    debug!("Surface triangles share vertex indices with the volume");

    writeln!(writer, "Triangles")?;
    writeln!(writer, "{}", triangles.len())?;
    for &tri in triangles {
        let [a, b, c] = tri.map(one_based);
        writeln!(writer, "{a} {b} {c} {reference}")?;
    }

    writeln!(writer, "Tetrahedra")?;
    writeln!(writer, "{}", tetrahedra.len())?;
    for &tet in tetrahedra {
        let [a, b, c, d] = tet.map(one_based);
        writeln!(writer, "{a} {b} {c} {d} {reference}")?;
    }

    debug!(
        vertices = vertices.len(),
        triangles = triangles.len(),
        tetrahedra = tetrahedra.len(),
        "Wrote MEDIT sections"
    );
    Ok(())
}

// =============================================================================
// Reading
// =============================================================================

/// Load a tetrahedral mesh from a MEDIT `.mesh` file.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - `Dimension` is missing or not 3, or an unknown section keyword appears
/// - A section is truncated or holds a non-numeric or non-positive index
pub fn load_medit<P: AsRef<Path>>(path: P) -> IoResult<TetMesh> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| IoError::on_open(path, e))?;
    let mesh = parse_medit(&text)?;

    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        tetrahedra = mesh.tetrahedron_count(),
        "Loaded MEDIT mesh"
    );
    Ok(mesh)
}

/// Parse MEDIT `.mesh` text.
///
/// Indices are converted to 0-based; they are not checked against the vertex
/// count (see [`TetMesh::has_valid_indices`]).
///
/// # Errors
///
/// See [`load_medit`].
///
/// # Example
///
/// ```
/// use volmesh_io::parse_medit;
///
/// let text = "MeshVersionFormatted 1\nDimension 3\nVertices\n1\n0 0 0 1\nEnd\n";
/// let mesh = parse_medit(text).unwrap();
/// assert_eq!(mesh.vertex_count(), 1);
/// ```
pub fn parse_medit(text: &str) -> IoResult<TetMesh> {
    let mut tokens = Tokens::new(text);
    let mut mesh = TetMesh::new();
    let mut has_dimension = false;

    while let Some(word) = tokens.next() {
        let keyword = word.to_ascii_lowercase();
        match keyword.as_str() {
            "meshversionformatted" => {
                let version: u32 = tokens.expect("MeshVersionFormatted")?.parse()?;
                if !(1..=4).contains(&version) {
                    return Err(IoError::invalid_content(format!(
                        "unsupported MeshVersionFormatted {version}"
                    )));
                }
            }
            "dimension" => {
                let dimension: u32 = tokens.expect("Dimension")?.parse()?;
                if dimension != 3 {
                    return Err(IoError::invalid_content(format!(
                        "only 3D meshes are supported, got Dimension {dimension}"
                    )));
                }
                has_dimension = true;
            }
            "vertices" => {
                let count = tokens.element_count("Vertices")?;
                mesh.vertices.reserve(count.min(MAX_PREALLOCATED_ROWS));
                for _ in 0..count {
                    let x = tokens.real("Vertices")?;
                    let y = tokens.real("Vertices")?;
                    let z = tokens.real("Vertices")?;
                    tokens.reference("Vertices")?;
                    mesh.vertices.push(Point3::new(x, y, z));
                }
            }
            "triangles" => mesh.triangles.extend(tokens.element_rows::<3>("Triangles")?),
            "tetrahedra" => mesh
                .tetrahedra
                .extend(tokens.element_rows::<4>("Tetrahedra")?),
            "end" => break,
            other => {
                let Some(width) = skipped_row_width(other) else {
                    return Err(IoError::invalid_content(format!(
                        "unknown MEDIT keyword '{word}'"
                    )));
                };
                let count = tokens.element_count(word)?;
                for _ in 0..count.saturating_mul(width) {
                    tokens.expect(word)?;
                }
                warn!(section = word, count, "Skipped MEDIT section");
            }
        }
    }

    if !has_dimension {
        return Err(IoError::invalid_content("MEDIT document has no Dimension"));
    }

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        tetrahedra = mesh.tetrahedron_count(),
        "Parsed MEDIT sections"
    );
    Ok(mesh)
}

/// Tokens per row of the sections the reader recognizes but does not keep.
fn skipped_row_width(keyword: &str) -> Option<usize> {
    match keyword {
        "corners" | "ridges" | "requiredvertices" | "requirededges" => Some(1),
        "edges" | "normals" | "tangents" => Some(3),
        "quadrilaterals" => Some(5),
        "hexahedra" => Some(9),
        _ => None,
    }
}

/// Whitespace-separated tokens with `#` comments removed.
struct Tokens<'a> {
    lines: std::str::Lines<'a>,
    current: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            current: "".split_whitespace(),
        }
    }

    fn expect(&mut self, section: &str) -> IoResult<&'a str> {
        self.next()
            .ok_or_else(|| IoError::unexpected_eof(format!("{section} section")))
    }

    fn element_count(&mut self, section: &str) -> IoResult<usize> {
        Ok(self.expect(section)?.parse()?)
    }

    fn real(&mut self, section: &str) -> IoResult<f64> {
        Ok(self.expect(section)?.parse()?)
    }

    fn reference(&mut self, section: &str) -> IoResult<i64> {
        Ok(self.expect(section)?.parse()?)
    }

    /// Read a 1-based index and return it 0-based.
    fn index(&mut self, section: &str) -> IoResult<u32> {
        let raw: i64 = self.expect(section)?.parse()?;
        raw.checked_sub(1)
            .and_then(|i| u32::try_from(i).ok())
            .ok_or_else(|| {
                IoError::invalid_content(format!("{section}: {raw} is not a valid 1-based index"))
            })
    }

    /// Read a count followed by that many rows of `N` indices and a reference.
    fn element_rows<const N: usize>(&mut self, section: &str) -> IoResult<Vec<[u32; N]>> {
        let count = self.element_count(section)?;
        let mut rows = Vec::with_capacity(count.min(MAX_PREALLOCATED_ROWS));
        for _ in 0..count {
            let mut row = [0u32; N];
            for slot in &mut row {
                *slot = self.index(section)?;
            }
            self.reference(section)?;
            rows.push(row);
        }
        Ok(rows)
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some(token) = self.current.next() {
                return Some(token);
            }
            let line = self.lines.next()?;
            let line = line.split_once('#').map_or(line, |(data, _)| data);
            self.current = line.split_whitespace();
        }
    }
}
