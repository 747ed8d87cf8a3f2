//! Error type shared by `Integer` and `Rational`.

use thiserror::Error;

/// Failures of exact arithmetic.
///
/// None of these are recoverable at the point of detection: the operation
/// has no exact result.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NumericError {
    /// Division or inversion of/by a finite zero.
    #[error("division by zero")]
    ZeroDivide,

    /// Undefined combination of infinities, such as `inf - inf` or `0 * inf`.
    #[error("undefined operation on infinite value (NaN)")]
    NotANumber,

    /// A narrowing conversion whose precondition does not hold.
    #[error("invalid conversion: {0}")]
    BadCast(String),

    /// Argument outside the domain of a function, such as the factorial of
    /// a negative number.
    #[error("argument out of domain: {0}")]
    Domain(String),

    /// Malformed textual literal.
    #[error("cannot parse number from {0:?}")]
    Parse(String),
}

/// Result alias for numeric operations.
pub type Result<T> = std::result::Result<T, NumericError>;

/// Panics with the error message.
///
/// Used by the `std::ops` operators, which cannot return a `Result`.
#[cold]
#[track_caller]
pub(crate) fn raise(err: NumericError) -> ! {
    panic!("{err}")
}
