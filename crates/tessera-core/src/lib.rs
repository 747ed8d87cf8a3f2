//! # tessera-core
//!
//! Storage primitives shared by the Tessera crates.
//!
//! This crate provides:
//! - [`SharedBuffer`], a reference-counted copy-on-write array with a
//!   prefix header, used as the body of every matrix and vector
//! - [`InternTable`], dense id assignment for values that are created once
//!   and compared by identity afterwards
//!
//! Buffers are confined to one thread; interning tables are plain data and
//! are wrapped in a lock by their owners.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod buffer;
pub mod error;
pub mod handle;
pub mod intern;

pub use buffer::{Ownership, SharedBuffer};
pub use error::{BufferError, Result};
pub use handle::InternId;
pub use intern::InternTable;
