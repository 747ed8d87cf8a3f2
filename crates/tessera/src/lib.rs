//! # Tessera
//!
//! Exact numbers and the containers around them.
//!
//! - [`integers`]: arbitrary precision [`Integer`](integers::Integer) and
//!   [`Rational`](integers::Rational) with signed infinities
//! - [`core`]: the copy-on-write [`SharedBuffer`](core::SharedBuffer) and a
//!   generic interning table
//! - [`linalg`]: dense [`Matrix`](linalg::Matrix) and
//!   [`Vector`](linalg::Vector) sharing storage until written, with row,
//!   column and minor views
//! - [`rings`]: process-wide identities of polynomial rings
//!
//! ## Quick Start
//!
//! ```
//! use tessera::prelude::*;
//!
//! let half = Rational::from_i64(1, 2)?;
//! let m = Matrix::from_rows(vec![
//!     vec![half.clone(), Rational::from(1)],
//!     vec![Rational::from(0), half],
//! ])?;
//! let view = m.share();
//! let doubled = view.scale(&Rational::from(2));
//! assert_eq!(doubled[(0, 0)], Rational::from(1));
//! assert!(m.is_same_storage(&view));
//!
//! let r = Ring::new(&["x", "y"]);
//! assert_eq!(r.n_vars(), 2);
//! # Ok::<(), tessera::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use thiserror::Error;

pub use tessera_core as core;
pub use tessera_integers as integers;
pub use tessera_linalg as linalg;
pub use tessera_rings as rings;

/// Any failure reported by the tessera crates.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// Arithmetic, parsing or conversion of numbers.
    #[error(transparent)]
    Numeric(#[from] tessera_integers::NumericError),

    /// Storage allocation.
    #[error(transparent)]
    Buffer(#[from] tessera_core::BufferError),

    /// Shapes and indices of matrices and vectors.
    #[error(transparent)]
    Matrix(#[from] tessera_linalg::MatrixError),

    /// Ring lookups.
    #[error(transparent)]
    Ring(#[from] tessera_rings::RingError),
}

/// Result alias over [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{Error, Result};
    pub use tessera_core::{Ownership, SharedBuffer};
    pub use tessera_integers::{Integer, Rational, Sign};
    pub use tessera_linalg::{All, Matrix, Vector};
    pub use tessera_rings::{Ring, RingId};
}
