//! Arbitrary precision integers with signed infinities.
//!
//! This module provides a wrapper around `dashu::IBig` extended by the two
//! sentinels `+inf` and `-inf`. A value is either finite or infinite; the
//! finite-only code paths are entered only after matching on that state.

use dashu::base::{
    Abs, BitTest, ExtendedGcd, Gcd, PowerOfTwo, Sign, Signed as DashuSigned, SquareRoot,
    UnsignedAbs,
};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::error::{NumericError, Result};
use crate::float;
use crate::ops::forward_fallible_binop;

/// An arbitrary precision integer, or one of the sentinels `±inf`.
///
/// Arithmetic follows machine-integer semantics for finite operands
/// (division truncates towards zero). Operations mixing infinities are
/// defined when the result has a well-defined sign and raise
/// [`NumericError::NotANumber`] otherwise.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Integer(Repr);

#[derive(Clone, PartialEq, Eq, Hash)]
enum Repr {
    Finite(IBig),
    Infinite { negative: bool },
}

/// Bezout data returned by [`Integer::ext_gcd`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtGcd {
    /// The gcd.
    pub g: Integer,
    /// Cofactor of the first operand.
    pub p: Integer,
    /// Cofactor of the second operand.
    pub q: Integer,
    /// First operand divided by `g`.
    pub k1: Integer,
    /// Second operand divided by `g`.
    pub k2: Integer,
}

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(Repr::Finite(IBig::from(value)))
    }

    /// Same as [`Integer::new`].
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self::new(value)
    }

    /// The infinite sentinel with the given sign.
    #[must_use]
    pub fn infinity(sign: Sign) -> Self {
        Self(Repr::Infinite {
            negative: sign == Sign::Negative,
        })
    }

    pub(crate) fn infinity_with_signum(signum: i8) -> Self {
        debug_assert!(signum != 0);
        Self(Repr::Infinite {
            negative: signum < 0,
        })
    }

    /// Creates an integer from a string in the given base.
    ///
    /// Only finite values are accepted here; use [`str::parse`] for the
    /// decimal grammar that includes `inf`.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::Parse`] if the string is not a valid integer.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self> {
        IBig::from_str_radix(s, radix)
            .map(|v| Self(Repr::Finite(v)))
            .map_err(|_| NumericError::Parse(s.to_string()))
    }

    /// Returns true unless this is `+inf` or `-inf`.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self.0, Repr::Finite(_))
    }

    /// Returns true for `+inf` and `-inf`.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        !self.is_finite()
    }

    /// Returns the sign of an infinite value, or 0 for finite values.
    #[must_use]
    pub fn inf_sign(&self) -> i8 {
        match self.0 {
            Repr::Finite(_) => 0,
            Repr::Infinite { negative: true } => -1,
            Repr::Infinite { negative: false } => 1,
        }
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        match &self.0 {
            Repr::Finite(v) if v.is_zero() => 0,
            Repr::Finite(v) if DashuSigned::is_positive(v) => 1,
            Repr::Finite(_) => -1,
            Repr::Infinite { .. } => self.inf_sign(),
        }
    }

    /// Returns true if this integer is negative (including `-inf`).
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.signum() < 0
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        match &self.0 {
            Repr::Finite(v) => Self(Repr::Finite(v.clone().abs())),
            Repr::Infinite { .. } => Self(Repr::Infinite { negative: false }),
        }
    }

    /// Returns the number of bits needed to represent the magnitude.
    ///
    /// Infinite values report `usize::MAX`.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        match &self.0 {
            Repr::Finite(v) => v.bit_len(),
            Repr::Infinite { .. } => usize::MAX,
        }
    }

    /// Returns the inner `dashu::IBig`, or `None` for infinite values.
    #[must_use]
    pub fn as_inner(&self) -> Option<&IBig> {
        match &self.0 {
            Repr::Finite(v) => Some(v),
            Repr::Infinite { .. } => None,
        }
    }

    /// Consumes the integer, returning the inner `dashu::IBig` if finite.
    #[must_use]
    pub fn into_inner(self) -> Option<IBig> {
        match self.0 {
            Repr::Finite(v) => Some(v),
            Repr::Infinite { .. } => None,
        }
    }

    /// Attempts to convert to an i64.
    ///
    /// Returns `None` if the value doesn't fit in an i64 or is infinite.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.as_inner().and_then(|v| v.clone().try_into().ok())
    }

    /// Nearest `f64`; the infinities map to `f64::INFINITY` and
    /// `f64::NEG_INFINITY`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match &self.0 {
            Repr::Finite(v) => v.to_f64().value(),
            Repr::Infinite { negative: true } => f64::NEG_INFINITY,
            Repr::Infinite { negative: false } => f64::INFINITY,
        }
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotANumber`] for `inf + (-inf)`.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        match (&self.0, &rhs.0) {
            (Repr::Finite(a), Repr::Finite(b)) => Ok(Self(Repr::Finite(a + b))),
            (Repr::Infinite { negative: a }, Repr::Infinite { negative: b }) if a != b => {
                Err(NumericError::NotANumber)
            }
            (Repr::Infinite { .. }, _) => Ok(self.clone()),
            (_, Repr::Infinite { .. }) => Ok(rhs.clone()),
        }
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotANumber`] for `inf - inf` with equal signs.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        match (&self.0, &rhs.0) {
            (Repr::Finite(a), Repr::Finite(b)) => Ok(Self(Repr::Finite(a - b))),
            (Repr::Infinite { negative: a }, Repr::Infinite { negative: b }) if a == b => {
                Err(NumericError::NotANumber)
            }
            (Repr::Infinite { .. }, _) => Ok(self.clone()),
            (_, Repr::Infinite { .. }) => Ok(-rhs),
        }
    }

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotANumber`] for `0 * inf`.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        match (&self.0, &rhs.0) {
            (Repr::Finite(a), Repr::Finite(b)) => Ok(Self(Repr::Finite(a * b))),
            _ => match self.signum() * rhs.signum() {
                0 => Err(NumericError::NotANumber),
                s => Ok(Self::infinity_with_signum(s)),
            },
        }
    }

    /// Checked division, truncating towards zero.
    ///
    /// A finite value divided by an infinity is 0; an infinity divided by a
    /// non-zero finite value keeps its magnitude and takes the product sign.
    ///
    /// # Errors
    ///
    /// [`NumericError::ZeroDivide`] if `rhs` is zero,
    /// [`NumericError::NotANumber`] for `inf / inf`.
    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        match (&self.0, &rhs.0) {
            (_, Repr::Finite(b)) if b.is_zero() => Err(NumericError::ZeroDivide),
            (Repr::Finite(a), Repr::Finite(b)) => Ok(Self(Repr::Finite(a / b))),
            (Repr::Finite(_), Repr::Infinite { .. }) => Ok(Self::zero()),
            (Repr::Infinite { .. }, Repr::Finite(_)) => {
                Ok(Self::infinity_with_signum(self.signum() * rhs.signum()))
            }
            (Repr::Infinite { .. }, Repr::Infinite { .. }) => Err(NumericError::NotANumber),
        }
    }

    /// Checked remainder of truncating division; see [`Integer::div_rem`].
    ///
    /// # Errors
    ///
    /// As for [`Integer::div_rem`].
    pub fn try_rem(&self, rhs: &Self) -> Result<Self> {
        self.div_rem(rhs).map(|(_, r)| r)
    }

    /// Truncating quotient and remainder.
    ///
    /// `inf / b` yields `(±inf, 0)`. A finite value has no remainder modulo
    /// an infinity, so `a / inf` is rejected.
    ///
    /// # Errors
    ///
    /// [`NumericError::ZeroDivide`] if `rhs` is zero,
    /// [`NumericError::NotANumber`] if `rhs` is infinite.
    pub fn div_rem(&self, rhs: &Self) -> Result<(Self, Self)> {
        match (&self.0, &rhs.0) {
            (_, Repr::Finite(b)) if b.is_zero() => Err(NumericError::ZeroDivide),
            (Repr::Finite(a), Repr::Finite(b)) => {
                Ok((Self(Repr::Finite(a / b)), Self(Repr::Finite(a % b))))
            }
            (Repr::Infinite { .. }, Repr::Finite(_)) => Ok((
                Self::infinity_with_signum(self.signum() * rhs.signum()),
                Self::zero(),
            )),
            (_, Repr::Infinite { .. }) => Err(NumericError::NotANumber),
        }
    }

    /// Division known to leave no remainder.
    ///
    /// `0 / 0` is allowed and yields 0. An infinite dividend stays infinite
    /// with the product sign; a finite dividend over an infinity is 0. If the
    /// division is not exact the truncated quotient is returned.
    ///
    /// # Errors
    ///
    /// [`NumericError::ZeroDivide`] for a non-zero finite value over zero,
    /// [`NumericError::NotANumber`] for `inf / 0` and `inf / inf`.
    pub fn div_exact(&self, rhs: &Self) -> Result<Self> {
        match (&self.0, &rhs.0) {
            (Repr::Finite(a), Repr::Finite(b)) if b.is_zero() => {
                if a.is_zero() {
                    Ok(self.clone())
                } else {
                    Err(NumericError::ZeroDivide)
                }
            }
            (Repr::Finite(a), Repr::Finite(b)) => Ok(Self(Repr::Finite(a / b))),
            (Repr::Finite(_), Repr::Infinite { .. }) => Ok(Self::zero()),
            (Repr::Infinite { .. }, Repr::Finite(b)) if !b.is_zero() => {
                Ok(Self::infinity_with_signum(self.signum() * rhs.signum()))
            }
            (Repr::Infinite { .. }, _) => Err(NumericError::NotANumber),
        }
    }

    /// Computes the greatest common divisor.
    ///
    /// If one operand is infinite the other one is returned unchanged.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        match (&self.0, &other.0) {
            (Repr::Finite(a), Repr::Finite(b)) => {
                Self(Repr::Finite(IBig::from(a.clone().gcd(b.clone()))))
            }
            (Repr::Finite(_), Repr::Infinite { .. }) => self.clone(),
            (Repr::Infinite { .. }, _) => other.clone(),
        }
    }

    /// Computes the least common multiple; `+inf` if either operand is
    /// infinite.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        match (&self.0, &other.0) {
            (Repr::Finite(a), Repr::Finite(b)) => {
                if a.is_zero() || b.is_zero() {
                    return Self::zero();
                }
                let g = IBig::from(a.clone().gcd(b.clone()));
                Self(Repr::Finite((a / &g * b).abs()))
            }
            _ => Self(Repr::Infinite { negative: false }),
        }
    }

    /// Extended Euclid: `g = a*p + b*q` with `a = k1*g` and `b = k2*g`.
    ///
    /// If `b` is infinite then `g = a`, and if only `a` is infinite then
    /// `g = b`. The cofactors are chosen so that the identities still hold.
    #[must_use]
    pub fn ext_gcd(&self, other: &Self) -> ExtGcd {
        match (&self.0, &other.0) {
            (Repr::Finite(a), Repr::Finite(b)) => {
                let (g, p, q) = a.clone().gcd_ext(b.clone());
                let g = IBig::from(g);
                let (k1, k2) = if g.is_zero() {
                    (IBig::ZERO, IBig::ZERO)
                } else {
                    (a / &g, b / &g)
                };
                ExtGcd {
                    g: Self::from(g),
                    p: Self::from(p),
                    q: Self::from(q),
                    k1: Self::from(k1),
                    k2: Self::from(k2),
                }
            }
            (Repr::Finite(_), Repr::Infinite { .. }) => ExtGcd {
                g: self.clone(),
                p: Self::one(),
                q: Self::zero(),
                k1: Self::one(),
                k2: other.clone(),
            },
            (Repr::Infinite { .. }, _) => ExtGcd {
                g: other.clone(),
                p: Self::zero(),
                q: Self::one(),
                k1: self.clone(),
                k2: Self::one(),
            },
        }
    }

    /// Integer square root, rounded down. `sqrt(±inf)` is `+inf`.
    ///
    /// # Errors
    ///
    /// [`NumericError::Domain`] for negative finite values.
    pub fn sqrt(&self) -> Result<Self> {
        match &self.0 {
            Repr::Finite(v) if DashuSigned::is_negative(v) => {
                Err(NumericError::Domain(format!("square root of {v}")))
            }
            Repr::Finite(v) => Ok(Self::from(IBig::from(v.sqrt()))),
            Repr::Infinite { .. } => Ok(Self(Repr::Infinite { negative: false })),
        }
    }

    /// `floor(log2(|self|))`, with 0 for zero.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotANumber`] for infinite values.
    pub fn log2_floor(&self) -> Result<usize> {
        let v = self.as_inner().ok_or(NumericError::NotANumber)?;
        Ok(v.bit_len().saturating_sub(1))
    }

    /// `ceil(log2(|self|))`, with 0 for zero.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotANumber`] for infinite values.
    pub fn log2_ceil(&self) -> Result<usize> {
        let v = self.as_inner().ok_or(NumericError::NotANumber)?;
        let floor = v.bit_len().saturating_sub(1);
        if v.is_zero() || v.unsigned_abs().is_power_of_two() {
            Ok(floor)
        } else {
            Ok(floor + 1)
        }
    }

    /// `k!`.
    ///
    /// # Errors
    ///
    /// [`NumericError::Domain`] if `k` is negative.
    pub fn fac(k: i64) -> Result<Self> {
        if k < 0 {
            return Err(NumericError::Domain(format!("factorial of {k}")));
        }
        Ok(Self::from(
            (2..=k).fold(IBig::ONE, |acc, i| acc * IBig::from(i)),
        ))
    }

    /// Binomial coefficient `n choose k`.
    ///
    /// Negative `n` follows `binom(n, k) = (-1)^k binom(k - n - 1, k)`, and
    /// negative `k` gives 0. For an infinite `n` and `k > 0` the result is
    /// `n^k`.
    #[must_use]
    pub fn binom(n: &Self, k: i64) -> Self {
        if k < 0 {
            return Self::zero();
        }
        let n = match &n.0 {
            Repr::Finite(v) => v,
            Repr::Infinite { .. } if k == 0 => return Self::one(),
            Repr::Infinite { negative } => {
                return Self(Repr::Infinite {
                    negative: *negative && k % 2 == 1,
                })
            }
        };
        let k = IBig::from(k);
        let non_negative = !DashuSigned::is_negative(n);
        if non_negative && &k > n {
            return Self::zero();
        }
        // Use the shorter half of the row.
        let k = if non_negative && n - &k < k { n - &k } else { k };
        let mut acc = IBig::ONE;
        let mut i = IBig::ZERO;
        while i < k {
            acc = acc * (n - &i);
            i += IBig::ONE;
            acc = acc / &i;
        }
        Self::from(acc)
    }

    /// Computes `self^exp`.
    ///
    /// Negative exponents are only accepted when the result is still an
    /// integer: for the bases `1` and `-1`, and for infinite bases (the
    /// result is 0). Other negative powers belong to `Rational::pow`.
    ///
    /// # Errors
    ///
    /// [`NumericError::ZeroDivide`] for `0^exp` with `exp < 0`,
    /// [`NumericError::BadCast`] if the result is not integral.
    pub fn pow(&self, exp: i64) -> Result<Self> {
        match &self.0 {
            Repr::Finite(v) if exp >= 0 => Ok(Self(Repr::Finite(v.pow(exp.unsigned_abs() as usize)))),
            Repr::Finite(v) if v.is_zero() => Err(NumericError::ZeroDivide),
            Repr::Finite(v) if *v == IBig::ONE => Ok(Self::one()),
            Repr::Finite(v) if *v == -IBig::ONE => {
                Ok(if exp % 2 == 0 { Self::one() } else { Self::new(-1) })
            }
            Repr::Finite(v) => Err(NumericError::BadCast(format!(
                "{v}^{exp} is not an integer"
            ))),
            Repr::Infinite { .. } => Ok(match exp.cmp(&0) {
                Ordering::Less => Self::zero(),
                Ordering::Equal => Self::one(),
                Ordering::Greater if exp % 2 == 0 => Self(Repr::Infinite { negative: false }),
                Ordering::Greater => self.clone(),
            }),
        }
    }

    /// Parses the decimal grammar `["+"|"-"] (digits | "inf")`.
    fn parse_decimal(s: &str) -> Result<Self> {
        let err = || NumericError::Parse(s.to_string());
        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        if body == "inf" {
            return Ok(Self(Repr::Infinite { negative }));
        }
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let magnitude = IBig::from_str_radix(body, 10).map_err(|_| err())?;
        Ok(Self(Repr::Finite(if negative { -magnitude } else { magnitude })))
    }
}

impl Default for Integer {
    fn default() -> Self {
        Self::zero()
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Repr::Finite(a), Repr::Finite(b)) => a.cmp(b),
            _ => self.inf_sign().cmp(&other.inf_sign()),
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<i64> for Integer {
    fn eq(&self, other: &i64) -> bool {
        self.to_i64() == Some(*other)
    }
}

impl PartialOrd<i64> for Integer {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.cmp(&Integer::new(*other)))
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(Repr::Finite(IBig::ZERO))
    }

    fn is_zero(&self) -> bool {
        matches!(&self.0, Repr::Finite(v) if v.is_zero())
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(Repr::Finite(IBig::ONE))
    }

    fn is_one(&self) -> bool {
        matches!(&self.0, Repr::Finite(v) if *v == IBig::ONE)
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({self})")
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Finite(v) => {
                let digits = v.unsigned_abs().to_string();
                f.pad_integral(!DashuSigned::is_negative(v), "", &digits)
            }
            Repr::Infinite { negative } => f.pad_integral(!negative, "", "inf"),
        }
    }
}

impl FromStr for Integer {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_decimal(s)
    }
}

// Arithmetic operations
forward_fallible_binop!(Integer, Add, add, AddAssign, add_assign, try_add);
forward_fallible_binop!(Integer, Sub, sub, SubAssign, sub_assign, try_sub);
forward_fallible_binop!(Integer, Mul, mul, MulAssign, mul_assign, try_mul);
forward_fallible_binop!(Integer, Div, div, DivAssign, div_assign, try_div);
forward_fallible_binop!(Integer, Rem, rem, RemAssign, rem_assign, try_rem);

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self.0 {
            Repr::Finite(v) => Self(Repr::Finite(-v)),
            Repr::Infinite { negative } => Self(Repr::Infinite {
                negative: !negative,
            }),
        }
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(Repr::Finite(IBig::from(value)))
    }
}

impl From<usize> for Integer {
    fn from(value: usize) -> Self {
        Self(Repr::Finite(IBig::from(value)))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(Repr::Finite(value))
    }
}

impl TryFrom<&Integer> for i64 {
    type Error = NumericError;

    fn try_from(value: &Integer) -> Result<Self> {
        value
            .to_i64()
            .ok_or_else(|| NumericError::BadCast(format!("{value} does not fit in i64")))
    }
}

impl TryFrom<f64> for Integer {
    type Error = NumericError;

    /// Exact conversion; infinite doubles map to the sentinels.
    fn try_from(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(NumericError::NotANumber);
        }
        if value.is_infinite() {
            return Ok(Self(Repr::Infinite {
                negative: value < 0.0,
            }));
        }
        if value.fract() != 0.0 {
            return Err(NumericError::BadCast(format!("{value} is not integral")));
        }
        let (mantissa, exponent) = float::decompose(value);
        // Integral doubles have a non-negative exponent once trailing zeros
        // are stripped.
        debug_assert!(exponent >= 0);
        Ok(Self(Repr::Finite(mantissa * float::pow2(exponent.unsigned_abs()))))
    }
}
