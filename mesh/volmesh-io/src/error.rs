//! Error types for volume mesh I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for volume mesh I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur during volume mesh I/O operations.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Destination could not be opened for writing.
    #[error("{path} could not be opened: {source}")]
    CouldNotOpen {
        /// Destination path.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Unknown file format (unrecognized extension).
    #[error("unknown file format: .{extension}")]
    UnknownFormat {
        /// The unrecognized extension.
        extension: String,
    },

    /// Invalid file content (parse error).
    #[error("invalid file content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// Input ended in the middle of a section.
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof {
        /// What was being read.
        context: String,
    },

    /// A list container has rows of different lengths.
    #[error("{container}: row {row} has {got} entries, row 0 has {expected}")]
    JaggedRows {
        /// Which container was jagged.
        container: &'static str,
        /// First offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// A rectangular container has the wrong row width.
    #[error("{container}: rows must have {expected} entries, got {got}")]
    RowArity {
        /// Which container had the wrong width.
        container: &'static str,
        /// Required row width.
        expected: usize,
        /// Actual row width.
        got: usize,
    },

    /// An element references a vertex that does not exist.
    #[error("{container}: row {row} references vertex {index}, but only {vertex_count} exist")]
    IndexOutOfRange {
        /// Which container held the bad index.
        container: &'static str,
        /// Offending row.
        row: usize,
        /// Offending 0-based index.
        index: i64,
        /// Number of vertices available.
        vertex_count: usize,
    },

    /// An index does not fit the signed 64-bit range MEDIT rows are written in.
    #[error("{container}: row {row} holds an index that does not fit in i64")]
    IndexOverflow {
        /// Which container held the bad index.
        container: &'static str,
        /// Offending row.
        row: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Float parsing error.
    #[error("float parsing error: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Integer parsing error.
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}

impl IoError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }

    /// Create an `UnexpectedEof` error for the given context.
    #[must_use]
    pub fn unexpected_eof(context: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            context: context.into(),
        }
    }

    /// Whether this error rejects the input containers before any file is opened.
    #[must_use]
    pub const fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::JaggedRows { .. } | Self::RowArity { .. } | Self::IndexOverflow { .. }
        )
    }

    /// Map an error from opening a file for reading.
    pub(crate) fn on_open(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(e)
        }
    }
}
