//! Arbitrary precision rational numbers with signed infinities.
//!
//! A `Rational` is a pair of [`Integer`]s kept in canonical form after
//! every operation:
//!
//! - numerator and denominator are coprime,
//! - the denominator is finite and positive,
//! - zero is stored as `0/1`,
//! - `±inf` is stored as `±inf/1`.
//!
//! All constructors and mutators funnel through one private
//! `canonicalize` step, so no partially updated pair is ever observable.

use dashu::base::{Gcd, Sign, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::error::{NumericError, Result};
use crate::float;
use crate::ops::forward_fallible_binop;
use crate::Integer;

/// An arbitrary precision rational number, or one of the sentinels `±inf`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    num: Integer,
    den: Integer,
}

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// The pair is reduced to lowest terms. An infinite numerator over a
    /// non-zero finite denominator gives the infinity with the product sign;
    /// a finite numerator over an infinite denominator gives zero.
    ///
    /// # Errors
    ///
    /// [`NumericError::ZeroDivide`] if the denominator is zero,
    /// [`NumericError::NotANumber`] if both parts are infinite.
    pub fn new(numerator: Integer, denominator: Integer) -> Result<Self> {
        let mut r = Self {
            num: numerator,
            den: denominator,
        };
        r.canonicalize()?;
        Ok(r)
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Errors
    ///
    /// [`NumericError::ZeroDivide`] if the denominator is zero.
    pub fn from_i64(numerator: i64, denominator: i64) -> Result<Self> {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self {
            num: n,
            den: Integer::one(),
        }
    }

    /// The infinite sentinel with the given sign.
    #[must_use]
    pub fn infinity(sign: Sign) -> Self {
        Self::from_integer(Integer::infinity(sign))
    }

    fn from_parts(num: IBig, den: IBig) -> Result<Self> {
        Self::new(Integer::from(num), Integer::from(den))
    }

    /// Numerator and denominator as big integers, if the value is finite.
    fn finite_parts(&self) -> Option<(&IBig, &IBig)> {
        match (self.num.as_inner(), self.den.as_inner()) {
            (Some(n), Some(d)) => Some((n, d)),
            _ => None,
        }
    }

    /// Restores the canonical form of `self.num / self.den`.
    ///
    /// On error `self` is left in an unspecified state; public mutators
    /// therefore canonicalize a candidate value and only then commit it.
    fn canonicalize(&mut self) -> Result<()> {
        match (self.num.as_inner(), self.den.as_inner()) {
            (Some(n), Some(d)) => {
                if d.is_zero() {
                    return Err(NumericError::ZeroDivide);
                }
                if n.is_zero() {
                    self.num = Integer::zero();
                    self.den = Integer::one();
                    return Ok(());
                }
                let g = IBig::from(n.clone().gcd(d.clone()));
                let (mut n, mut d) = if g == IBig::ONE {
                    (n.clone(), d.clone())
                } else {
                    (n / &g, d / &g)
                };
                if DashuSigned::is_negative(&d) {
                    n = -n;
                    d = -d;
                }
                self.num = Integer::from(n);
                self.den = Integer::from(d);
            }
            (None, Some(d)) => {
                if d.is_zero() {
                    return Err(NumericError::ZeroDivide);
                }
                self.num = Integer::infinity_with_signum(self.num.signum() * self.den.signum());
                self.den = Integer::one();
            }
            (Some(_), None) => {
                self.num = Integer::zero();
                self.den = Integer::one();
            }
            (None, None) => return Err(NumericError::NotANumber),
        }
        Ok(())
    }

    /// Returns the numerator. Carries the sign of the value.
    #[must_use]
    pub fn numerator(&self) -> &Integer {
        &self.num
    }

    /// Returns the denominator, always finite and positive.
    #[must_use]
    pub fn denominator(&self) -> &Integer {
        &self.den
    }

    /// Replaces the numerator and re-canonicalizes.
    ///
    /// `self` is unchanged if an error is returned.
    ///
    /// # Errors
    ///
    /// As for [`Rational::new`].
    pub fn set_numerator(&mut self, numerator: Integer) -> Result<()> {
        *self = Self::new(numerator, self.den.clone())?;
        Ok(())
    }

    /// Replaces the denominator and re-canonicalizes.
    ///
    /// `self` is unchanged if an error is returned.
    ///
    /// # Errors
    ///
    /// As for [`Rational::new`].
    pub fn set_denominator(&mut self, denominator: Integer) -> Result<()> {
        *self = Self::new(self.num.clone(), denominator)?;
        Ok(())
    }

    /// Returns true unless this is `+inf` or `-inf`.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.num.is_finite()
    }

    /// Returns the sign of an infinite value, or 0 for finite values.
    #[must_use]
    pub fn inf_sign(&self) -> i8 {
        self.num.inf_sign()
    }

    /// Returns true iff the denominator is 1.
    ///
    /// The infinities are stored as `±inf/1` and therefore count as
    /// integral. Callers that need a finite integer must also check
    /// [`Rational::is_finite`].
    #[must_use]
    pub fn is_integral(&self) -> bool {
        self.den.is_one()
    }

    /// Converts to an integer if the denominator is 1.
    ///
    /// Infinite values convert to the infinite `Integer` of the same sign.
    ///
    /// # Errors
    ///
    /// [`NumericError::BadCast`] if the value is not integral.
    pub fn to_integer(&self) -> Result<Integer> {
        if self.is_integral() {
            Ok(self.num.clone())
        } else {
            Err(NumericError::BadCast(format!("{self} is not integral")))
        }
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        self.num.signum()
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.num.is_negative()
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    /// Equality of absolute values.
    #[must_use]
    pub fn abs_eq(&self, other: &Self) -> bool {
        self.den == other.den && self.num.abs() == other.num.abs()
    }

    /// Largest integer not greater than `self`.
    #[must_use]
    pub fn floor(&self) -> Integer {
        match self.finite_parts() {
            Some((n, d)) => {
                let (q, r) = (n / d, n % d);
                Integer::from(if DashuSigned::is_negative(&r) { q - IBig::ONE } else { q })
            }
            None => self.num.clone(),
        }
    }

    /// Smallest integer not less than `self`.
    #[must_use]
    pub fn ceil(&self) -> Integer {
        match self.finite_parts() {
            Some((n, d)) => {
                let (q, r) = (n / d, n % d);
                Integer::from(if !r.is_zero() && DashuSigned::is_positive(&r) {
                    q + IBig::ONE
                } else {
                    q
                })
            }
            None => self.num.clone(),
        }
    }

    /// Rounds towards zero.
    #[must_use]
    pub fn trunc(&self) -> Integer {
        match self.finite_parts() {
            Some((n, d)) => Integer::from(n / d),
            None => self.num.clone(),
        }
    }

    /// Returns the reciprocal (1/x). The reciprocal of `±inf` is 0.
    ///
    /// # Errors
    ///
    /// [`NumericError::ZeroDivide`] if the rational is zero.
    pub fn recip(&self) -> Result<Self> {
        if !self.is_finite() {
            return Ok(Self::zero());
        }
        Self::new(self.den.clone(), self.num.clone())
    }

    /// Computes `self^exp`.
    ///
    /// `x^0` is 1 for every `x`, including zero and the infinities. For
    /// infinite bases a positive odd exponent keeps the sign, a positive
    /// even exponent gives `+inf` and a negative exponent gives 0.
    ///
    /// # Errors
    ///
    /// [`NumericError::ZeroDivide`] for `0^exp` with `exp < 0`.
    pub fn pow(&self, exp: i64) -> Result<Self> {
        let Some((n, d)) = self.finite_parts() else {
            return Ok(Self::from_integer(self.num.pow(exp)?));
        };
        let k = exp.unsigned_abs() as usize;
        match exp.cmp(&0) {
            Ordering::Equal => Ok(Self::one()),
            Ordering::Greater => Self::from_parts(n.pow(k), d.pow(k)),
            Ordering::Less if n.is_zero() => Err(NumericError::ZeroDivide),
            Ordering::Less => Self::from_parts(d.pow(k), n.pow(k)),
        }
    }

    /// Adds one in place. Infinities are unchanged.
    pub fn increment(&mut self) {
        if let Some((n, d)) = self.finite_parts() {
            let num = n + d;
            let den = d.clone();
            self.num = Integer::from(num);
            self.den = Integer::from(den);
            // n/d + 1 = (n + d)/d is already reduced when n/d is; the
            // shared step still runs so the invariant has a single owner.
            if self.canonicalize().is_err() {
                unreachable!("finite value with positive denominator");
            }
        }
    }

    /// Subtracts one in place. Infinities are unchanged.
    pub fn decrement(&mut self) {
        if let Some((n, d)) = self.finite_parts() {
            let num = n - d;
            let den = d.clone();
            self.num = Integer::from(num);
            self.den = Integer::from(den);
            if self.canonicalize().is_err() {
                unreachable!("finite value with positive denominator");
            }
        }
    }

    /// Multiplies by `2^k`. Infinities are unchanged.
    #[must_use]
    pub fn mul_pow2(&self, k: u32) -> Self {
        match self.finite_parts() {
            Some((n, d)) => Self::from_parts(n * float::pow2(k), d.clone())
                .unwrap_or_else(|_| unreachable!("positive denominator")),
            None => self.clone(),
        }
    }

    /// Divides by `2^k`. Infinities are unchanged.
    #[must_use]
    pub fn div_pow2(&self, k: u32) -> Self {
        match self.finite_parts() {
            Some((n, d)) => Self::from_parts(n.clone(), d * float::pow2(k))
                .unwrap_or_else(|_| unreachable!("positive denominator")),
            None => self.clone(),
        }
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotANumber`] for `inf + (-inf)`.
    pub fn try_add(&self, rhs: &Self) -> Result<Self> {
        match (self.finite_parts(), rhs.finite_parts()) {
            (Some((a, b)), Some((c, d))) => {
                let (num, den) = add_parts(a, b, c, d);
                Self::from_parts(num, den)
            }
            _ => self.num.try_add(&rhs.num).map(Self::from_integer),
        }
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotANumber`] for `inf - inf` with equal signs.
    pub fn try_sub(&self, rhs: &Self) -> Result<Self> {
        match (self.finite_parts(), rhs.finite_parts()) {
            (Some((a, b)), Some((c, d))) => {
                let (num, den) = add_parts(a, b, &-c, d);
                Self::from_parts(num, den)
            }
            _ => self.num.try_sub(&rhs.num).map(Self::from_integer),
        }
    }

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotANumber`] for `0 * inf`.
    pub fn try_mul(&self, rhs: &Self) -> Result<Self> {
        match (self.finite_parts(), rhs.finite_parts()) {
            (Some((a, b)), Some((c, d))) => {
                let (num, den) = mul_parts(a, b, c, d);
                Self::from_parts(num, den)
            }
            _ => self.num.try_mul(&rhs.num).map(Self::from_integer),
        }
    }

    /// Checked division.
    ///
    /// `x / ±inf` is 0 for finite `x`; `±inf / y` is an infinity with the
    /// product sign for finite non-zero `y`.
    ///
    /// # Errors
    ///
    /// [`NumericError::ZeroDivide`] if `rhs` is zero,
    /// [`NumericError::NotANumber`] for `inf / inf`.
    pub fn try_div(&self, rhs: &Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(NumericError::ZeroDivide);
        }
        match (self.finite_parts(), rhs.finite_parts()) {
            (Some((a, b)), Some((c, d))) => {
                // a/b / c/d = a*d / (b*c)
                let (num, den) = mul_parts(a, b, d, c);
                Self::from_parts(num, den)
            }
            _ => self.num.try_div(&rhs.num).map(Self::from_integer),
        }
    }

    /// Nearest `f64`; the infinities map to `f64::INFINITY` and
    /// `f64::NEG_INFINITY`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let Some((n, d)) = self.finite_parts() else {
            return self.num.to_f64();
        };
        const EXACT: usize = f64::MANTISSA_DIGITS as usize;
        if self.num.bit_len() <= EXACT && self.den.bit_len() <= EXACT {
            return self.num.to_f64() / self.den.to_f64();
        }
        // Scale so that the quotient carries 64 significant bits.
        let shift = 64 + self.den.bit_len() as i64 - self.num.bit_len() as i64;
        let q = if shift >= 0 {
            n * float::pow2(shift.unsigned_abs() as u32) / d
        } else {
            n / (d * float::pow2(shift.unsigned_abs() as u32))
        };
        float::scale_pow2(Integer::from(q).to_f64(), -shift)
    }

    /// Parses `["+"|"-"] (digits ["." digits] | digits "/" digits | "inf")`.
    fn parse_literal(s: &str) -> Result<Self> {
        let err = || NumericError::Parse(s.to_string());
        let digits = |t: &str| -> Result<IBig> {
            if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
                return Err(err());
            }
            IBig::from_str_radix(t, 10).map_err(|_| err())
        };

        let (negative, body) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let sign = |v: IBig| if negative { -v } else { v };

        if body == "inf" {
            let sign = if negative { Sign::Negative } else { Sign::Positive };
            return Ok(Self::infinity(sign));
        }
        if let Some((num, den)) = body.split_once('/') {
            return Self::from_parts(sign(digits(num)?), digits(den)?);
        }
        if let Some((int, frac)) = body.split_once('.') {
            let scale = IBig::from(10u8).pow(frac.len());
            let num = digits(int)? * &scale + digits(frac)?;
            return Self::from_parts(sign(num), scale);
        }
        Ok(Self::from_integer(Integer::from(sign(digits(body)?))))
    }
}

/// `a/b + c/d` with `b, d > 0`, using `gcd(b, d)` to keep the
/// intermediate products small. The result is already in lowest terms.
fn add_parts(a: &IBig, b: &IBig, c: &IBig, d: &IBig) -> (IBig, IBig) {
    let g = IBig::from(b.clone().gcd(d.clone()));
    if g == IBig::ONE {
        return (a * d + c * b, b * d);
    }
    let b_g = b / &g;
    let t = a * (d / &g) + c * &b_g;
    let g2 = IBig::from(t.clone().gcd(g.clone()));
    if g2 == IBig::ONE {
        (t, b_g * d)
    } else {
        (t / &g2, b_g * (d / &g2))
    }
}

/// `(a/b) * (c/d)` with cross-cancellation before multiplying.
fn mul_parts(a: &IBig, b: &IBig, c: &IBig, d: &IBig) -> (IBig, IBig) {
    let g1 = IBig::from(a.clone().gcd(d.clone()));
    let g2 = IBig::from(c.clone().gcd(b.clone()));
    ((a / &g1) * (c / &g2), (b / &g2) * (d / &g1))
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self::from_integer(Integer::zero())
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self::from_integer(Integer::one())
    }

    fn is_one(&self) -> bool {
        self.num.is_one() && self.den.is_one()
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.finite_parts(), other.finite_parts()) {
            (Some((a, b)), Some((c, d))) => {
                if b == d {
                    a.cmp(c)
                } else {
                    (a * d).cmp(&(c * b))
                }
            }
            _ => self.inf_sign().cmp(&other.inf_sign()),
        }
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<Integer> for Rational {
    fn eq(&self, other: &Integer) -> bool {
        self.den.is_one() && self.num == *other
    }
}

impl PartialOrd<Integer> for Rational {
    fn partial_cmp(&self, other: &Integer) -> Option<Ordering> {
        Some(self.cmp(&Self::from_integer(other.clone())))
    }
}

impl PartialEq<i64> for Rational {
    fn eq(&self, other: &i64) -> bool {
        self.den.is_one() && self.num == *other
    }
}

impl PartialOrd<i64> for Rational {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.cmp(&Self::from(*other)))
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integral() {
            fmt::Display::fmt(&self.num, f)
        } else {
            let body = format!("{}/{}", self.num.abs(), self.den);
            f.pad_integral(!self.is_negative(), "", &body)
        }
    }
}

impl FromStr for Rational {
    type Err = NumericError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_literal(s)
    }
}

// Arithmetic operations
forward_fallible_binop!(Rational, Add, add, AddAssign, add_assign, try_add);
forward_fallible_binop!(Rational, Sub, sub, SubAssign, sub_assign, try_sub);
forward_fallible_binop!(Rational, Mul, mul, MulAssign, mul_assign, try_mul);
forward_fallible_binop!(Rational, Div, div, DivAssign, div_assign, try_div);

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            num: -self.num,
            den: self.den,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<&Integer> for Rational {
    fn from(n: &Integer) -> Self {
        Self::from_integer(n.clone())
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::new(i64::from(n)))
    }
}

impl TryFrom<f64> for Rational {
    type Error = NumericError;

    /// Exact conversion; infinite doubles map to the sentinels.
    fn try_from(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(NumericError::NotANumber);
        }
        if value.is_infinite() {
            let sign = if value < 0.0 { Sign::Negative } else { Sign::Positive };
            return Ok(Self::infinity(sign));
        }
        let (mantissa, exponent) = float::decompose(value);
        let scale = float::pow2(exponent.unsigned_abs());
        if exponent >= 0 {
            Self::from_parts(mantissa * scale, IBig::ONE)
        } else {
            Self::from_parts(mantissa, scale)
        }
    }
}

impl TryFrom<&Rational> for Integer {
    type Error = NumericError;

    fn try_from(value: &Rational) -> Result<Self> {
        value.to_integer()
    }
}
