//! # tessera-integers
//!
//! Exact integer and rational arithmetic for Tessera.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers with `±inf` sentinels (`Integer`)
//! - Canonical arbitrary precision rationals with `±inf` sentinels (`Rational`)
//!
//! Every operation has a fallible `try_*` form returning
//! [`NumericError`]. The `std::ops` operators call the fallible form and
//! panic on error, so `inf - inf` written with `-` is a bug in the caller.
//!
//! ## Infinity rules
//!
//! - `inf + inf = inf`, `inf - inf` is NaN
//! - `x / ±inf = 0` for finite `x`, but `x % ±inf` is NaN
//! - `0 * inf` and `inf / inf` are NaN
//! - `±inf` compares below/above every finite value

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
mod float;
pub mod integer;
mod ops;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use dashu::base::Sign;
pub use error::{NumericError, Result};
pub use integer::{ExtGcd, Integer};
pub use rational::Rational;
