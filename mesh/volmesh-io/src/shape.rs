//! Conversion of list-of-rows containers into fixed-arity rows.
//!
//! Legacy callers hand meshes over as `Vec<Vec<_>>`. Before anything is
//! written, every container must be rectangular and have the row width
//! the format expects.

use crate::error::{IoError, IoResult};

/// Convert a list of rows into fixed-width rows of `N` entries.
///
/// An empty container is valid and yields no rows.
///
/// # Errors
///
/// - [`IoError::JaggedRows`] if any row differs in length from the first
/// - [`IoError::RowArity`] if the rows are uniform but not `N` wide
///
/// # Example
///
/// ```
/// use volmesh_io::to_fixed_rows;
///
/// let rows = vec![vec![0, 1, 2], vec![2, 1, 3]];
/// let fixed: Vec<[i32; 3]> = to_fixed_rows(&rows, "triangles").unwrap();
/// assert_eq!(fixed[1], [2, 1, 3]);
///
/// let jagged = vec![vec![0, 1, 2], vec![2, 1]];
/// assert!(to_fixed_rows::<i32, _, 3>(&jagged, "triangles").is_err());
/// ```
pub fn to_fixed_rows<T, R, const N: usize>(
    rows: &[R],
    container: &'static str,
) -> IoResult<Vec<[T; N]>>
where
    T: Copy,
    R: AsRef<[T]>,
{
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let expected = first.as_ref().len();

    if let Some((row, r)) = rows
        .iter()
        .enumerate()
        .find(|(_, r)| r.as_ref().len() != expected)
    {
        return Err(IoError::JaggedRows {
            container,
            row,
            expected,
            got: r.as_ref().len(),
        });
    }

    if expected != N {
        return Err(IoError::RowArity {
            container,
            expected: N,
            got: expected,
        });
    }

    rows.iter()
        .map(|r| {
            <[T; N]>::try_from(r.as_ref()).map_err(|_| IoError::RowArity {
                container,
                expected: N,
                got: r.as_ref().len(),
            })
        })
        .collect()
}
