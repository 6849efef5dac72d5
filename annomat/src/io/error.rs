//! Error types for the text adapters

use annomat_core::MatrixError;
use thiserror::Error;

/// Errors raised while reading or writing a text table
#[derive(Debug, Error)]
pub enum TableError {
    /// Underlying reader or writer failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited stream could not be tokenised
    #[error("delimited text error: {0}")]
    Csv(#[from] csv::Error),

    /// The table layout is malformed; `line` is 1-based
    #[error("line {line}: {message}")]
    Format { line: u64, message: String },

    /// Building the matrix failed
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

impl TableError {
    pub(crate) fn format(line: u64, message: impl Into<String>) -> Self {
        TableError::Format {
            line,
            message: message.into(),
        }
    }

    /// Line number of a layout error
    pub fn line(&self) -> Option<u64> {
        match self {
            TableError::Format { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for the text adapters
pub type TableResult<T> = std::result::Result<T, TableError>;
