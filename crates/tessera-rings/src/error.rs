//! Error type for ring bookkeeping.

use thiserror::Error;

/// Failures of ring lookups and annotations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RingError {
    /// A list of names whose length is not the ring's number of variables.
    #[error("wrong number of variables: expected {expected}, found {found}")]
    WrongArity {
        /// Number of variables of the ring.
        expected: usize,
        /// Number of names supplied.
        found: usize,
    },

    /// A raw id that was never handed out by the repository.
    #[error("no ring with id {0}")]
    UnknownRing(u32),
}

/// Result alias for ring operations.
pub type Result<T> = std::result::Result<T, RingError>;
