//! Error type for shared storage.

use thiserror::Error;

/// Failures when acquiring or growing a [`SharedBuffer`](crate::SharedBuffer).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The allocator refused a request for `requested` elements.
    #[error("allocation of {requested} elements failed")]
    OutOfMemory {
        /// Number of elements that were requested.
        requested: usize,
    },
}

/// Result alias for buffer operations.
pub type Result<T> = std::result::Result<T, BufferError>;
