//! OBJ (Wavefront) input support.
//!
//! Vertex positions and polygonal faces are read with `tobj`; texture
//! coordinates, normals, materials, points and lines are ignored. Faces keep
//! their polygon shape and all objects/groups are merged into one input.

use std::path::Path;

use tracing::{debug, info};
use volmesh_types::{Facet, Point3, TetInput};

use crate::error::{IoError, IoResult};

/// Load an OBJ file as a tetrahedralization input.
///
/// # Errors
///
/// Returns an error if the file does not exist or `tobj` rejects it.
///
/// # Example
///
/// ```no_run
/// use volmesh_io::load_obj;
///
/// let input = load_obj("part.obj").unwrap();
/// println!("{} facets", input.facet_count());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<TetInput> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: false,
            single_index: false,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        },
    )
    .map_err(|e| IoError::invalid_content(format!("failed to parse OBJ: {e}")))?;

    let mut input = TetInput::new();
    let mut offset = 0u32;

    for model in &models {
        let mesh = &model.mesh;

        for p in mesh.positions.chunks_exact(3) {
            input.points.push(Point3::new(p[0], p[1], p[2]));
        }

        // Indices are local to each model; empty arities mean all triangles.
        let mut start = 0usize;
        let face_count = if mesh.face_arities.is_empty() {
            mesh.indices.len() / 3
        } else {
            mesh.face_arities.len()
        };
        for f in 0..face_count {
            let arity = mesh.face_arities.get(f).map_or(3, |&a| a as usize);
            let corners = mesh.indices.get(start..start + arity).ok_or_else(|| {
                IoError::invalid_content(format!("OBJ model '{}' has a truncated face", model.name))
            })?;
            input.facets.push(Facet::new(
                corners.iter().map(|&i| i + offset).collect(),
                0,
            ));
            start += arity;
        }

        debug!(
            model = %model.name,
            points = mesh.positions.len() / 3,
            faces = face_count,
            "Read OBJ model"
        );

        offset = u32::try_from(input.points.len()).map_err(|_| {
            IoError::invalid_content("OBJ has more vertices than 32-bit indices can address")
        })?;
    }

    info!(
        path = %path.display(),
        points = input.point_count(),
        facets = input.facet_count(),
        models = models.len(),
        "Loaded OBJ"
    );
    Ok(input)
}
