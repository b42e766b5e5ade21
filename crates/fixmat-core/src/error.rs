//! Error types for matrix operations
//!
//! Shape and structural-type contract violations are rejected at compile time
//! wherever the violation is visible in the type parameters. Everything that
//! can only be detected at runtime (indices, writes to implied cells, text
//! input, iteration counts) is reported through [`MatError`].
//!
//! # Examples
//!
//! ```
//! use fixmat_core::{kind, Mat, MatError};
//!
//! let mut upper = Mat::<i32, 3, 3, kind::Upper>::zeros();
//! let err = upper.try_set(2, 0, 7).unwrap_err();
//! assert!(matches!(err, MatError::ReadOnlyCell { row: 2, col: 0, .. }));
//! ```

use crate::structure::MatType;
use thiserror::Error;

/// Error type for matrix operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatError {
    /// A flat sequence or file header does not match the compile-time shape
    #[error("{operation}: dimension does not match - expected {expected}, got {actual}")]
    DimensionMismatch {
        operation: String,
        expected: usize,
        actual: usize,
    },

    /// Logical (row, col) coordinate outside the matrix
    #[error("index ({row}, {col}) out of range for a {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Compact-buffer index outside the stored cells
    #[error("compact index {index} out of range for {size} stored elements")]
    CompactIndexOutOfRange { index: usize, size: usize },

    /// Write to a structurally implied cell
    #[error("element ({row}, {col}) of a {kind} matrix cannot be modified")]
    ReadOnlyCell { row: usize, col: usize, kind: MatType },

    /// Newton-Schulz inversion needs at least one iteration
    #[error("invalid iteration count {0}: at least one iteration is required")]
    InvalidIterations(usize),

    /// Reciprocal of a zero diagonal entry
    #[error("diagonal element {index} is zero and has no reciprocal")]
    SingularDiagonal { index: usize },

    /// Malformed text input
    #[error("parse error in {context}: {message}")]
    Parse { context: String, message: String },

    /// Text input declares a different structural type
    #[error("type mismatch: matrix is `{expected}`, input declares `{found}`")]
    TypeMismatch { expected: MatType, found: String },

    /// Feature that exists as a declared entry point only
    #[error("{0} is not supported")]
    Unsupported(String),

    /// Rejected synthesis hint
    #[error("invalid synthesis hint: {0}")]
    InvalidHint(String),

    /// Underlying reader/writer failure
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for matrix operations
pub type MatResult<T> = Result<T, MatError>;

impl MatError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(operation: impl Into<String>, expected: usize, actual: usize) -> Self {
        MatError::DimensionMismatch {
            operation: operation.into(),
            expected,
            actual,
        }
    }

    /// Create an out-of-range error
    pub fn out_of_range(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        MatError::IndexOutOfRange {
            row,
            col,
            rows,
            cols,
        }
    }

    /// Create a read-only cell error
    pub fn read_only(row: usize, col: usize, kind: MatType) -> Self {
        MatError::ReadOnlyCell { row, col, kind }
    }

    /// Create a parse error
    pub fn parse(context: impl Into<String>, message: impl Into<String>) -> Self {
        MatError::Parse {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported-feature error
    pub fn unsupported(what: impl Into<String>) -> Self {
        MatError::Unsupported(what.into())
    }
}

impl From<std::io::Error> for MatError {
    fn from(err: std::io::Error) -> Self {
        MatError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = MatError::dimension_mismatch("from_slice", 10, 9);
        let msg = err.to_string();
        assert!(msg.contains("from_slice"));
        assert!(msg.contains("dimension does not match"));
        assert!(msg.contains("expected 10"));
        assert!(msg.contains("got 9"));
    }

    #[test]
    fn test_read_only_display() {
        let err = MatError::read_only(3, 1, MatType::Upper);
        let msg = err.to_string();
        assert!(msg.contains("(3, 1)"));
        assert!(msg.contains("upper"));
        assert!(msg.contains("cannot be modified"));
    }

    #[test]
    fn test_out_of_range_display() {
        let err = MatError::out_of_range(4, 0, 4, 4);
        assert_eq!(err.to_string(), "index (4, 0) out of range for a 4x4 matrix");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err: MatError = io.into();
        assert!(matches!(err, MatError::Io(ref m) if m.contains("short read")));
    }
}
