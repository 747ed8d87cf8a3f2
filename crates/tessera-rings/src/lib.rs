//! # tessera-rings
//!
//! Identity of polynomial rings.
//!
//! Every ring is registered once in a process-wide table and referred to by
//! a small [`RingId`]. Comparing two rings is an integer comparison. The
//! table is guarded by a mutex, so rings may be created from any thread.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_panics_doc)]

pub mod error;
pub mod repository;
pub mod ring;

pub use error::{Result, RingError};
pub use repository::{Names, RingId};
pub use ring::Ring;
