//! Error type for matrix and vector operations.

use tessera_core::BufferError;
use thiserror::Error;

/// Failures of container operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// An element, row, column, or slice bound outside the container.
    #[error("index {index} out of range for extent {extent}")]
    IndexOutOfRange {
        /// The offending index (for ranges, the exclusive end).
        index: usize,
        /// The extent of the dimension that was indexed.
        extent: usize,
    },

    /// Operands whose shapes do not fit together.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The extent required by the receiver.
        expected: usize,
        /// The extent that was supplied.
        found: usize,
    },

    /// The storage layer could not allocate.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Result alias for container operations.
pub type Result<T> = std::result::Result<T, MatrixError>;

pub(crate) fn check_index(index: usize, extent: usize) -> Result<()> {
    if index < extent {
        Ok(())
    } else {
        Err(MatrixError::IndexOutOfRange { index, extent })
    }
}

pub(crate) fn check_dim(expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(MatrixError::DimensionMismatch { expected, found })
    }
}

/// Panics with the error message; for operators that cannot return `Result`.
#[cold]
#[track_caller]
pub(crate) fn raise(err: MatrixError) -> ! {
    panic!("{err}")
}
