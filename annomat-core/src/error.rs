//! Error types for annotated matrix operations

use alloc::string::String;
use thiserror::Error;

/// Errors that can occur while mutating or reshaping a matrix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// A write addressed a cell outside a fixed-shape matrix
    #[error("cell ({row}, {col}) is outside a {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// An annotation vector does not match the length of its axis
    #[error("annotation `{name}` has length {actual}, axis length is {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// No annotation is registered under this name
    #[error("unknown annotation `{0}`")]
    UnknownAnnotation(String),
    /// An annotation name is already taken
    #[error("annotation `{0}` already exists")]
    DuplicateAnnotation(String),
    /// Annotation names must be non-empty and free of delimiters
    #[error("invalid annotation name {0:?}")]
    InvalidLabel(String),
    /// The storage kind only supports square shapes
    #[error("{kind} storage requires a square shape, got {rows}x{cols}")]
    NotSquare {
        kind: &'static str,
        rows: usize,
        cols: usize,
    },
    /// rows * cols overflows usize
    #[error("a {rows}x{cols} matrix is too large to address")]
    SizeOverflow { rows: usize, cols: usize },
    /// A search pattern failed to compile
    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),
}

/// Result type for matrix operations
pub type Result<T> = core::result::Result<T, MatrixError>;
