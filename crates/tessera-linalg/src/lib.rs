//! # tessera-linalg
//!
//! Dense copy-on-write matrices and vectors for Tessera.
//!
//! This crate provides:
//! - `Matrix<E>`, an r×c grid stored row-major in one shared buffer
//! - `Vector<E>`, the one-dimensional case
//! - Borrowed row, column, slice, and minor views
//!
//! ## Sharing
//!
//! `clone()` is O(1) and shares storage. Any write path (`IndexMut`,
//! `as_mut_slice`, the `*_mut` views, resizing, appending) first gives the
//! writer a private copy if the storage is shared. A writable view divorces
//! once when it is created and then writes directly into its owner; the
//! borrow checker keeps the owner alive and unresized meanwhile.
//!
//! ## Bounds checks
//!
//! `get`/`get_mut` and all view constructors are always checked. The
//! `Index`/`IndexMut` operators are checked in debug builds and, with the
//! default `bounds-check` feature, in release builds too; without it an
//! out-of-range column may silently address the next row.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod matrix;
pub mod select;
pub mod vector;
pub mod views;

pub use error::{MatrixError, Result};
pub use matrix::{Dim, Matrix};
pub use select::{All, Selector};
pub use vector::Vector;
pub use views::{Col, ColMut, Line, LineMut, Minor, MinorMut, Row, RowMut};

#[cfg(test)]
mod tests;
