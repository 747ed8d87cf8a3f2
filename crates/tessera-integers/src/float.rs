//! Exact decomposition of binary floating point values.

use dashu::integer::IBig;

/// Splits a finite `f64` into `(mantissa, exponent)` with
/// `value == mantissa * 2^exponent` exactly.
pub(crate) fn decompose(value: f64) -> (IBig, i32) {
    debug_assert!(value.is_finite());
    let bits = value.to_bits();
    let negative = bits >> 63 != 0;
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);

    // Subnormals have no implicit leading bit.
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };

    // Strip trailing zeros so callers get the smallest exponent magnitude.
    let (mantissa, exponent) = if mantissa == 0 {
        (0, 0)
    } else {
        let shift = mantissa.trailing_zeros();
        (mantissa >> shift, exponent + shift as i32)
    };

    let mantissa = IBig::from(mantissa);
    (if negative { -mantissa } else { mantissa }, exponent)
}

/// `2^exp` as a big integer.
pub(crate) fn pow2(exp: u32) -> IBig {
    IBig::from(2u8).pow(exp as usize)
}

/// `mantissa * 2^exponent` as an `f64`, without intermediate overflow for
/// exponents outside the `powi` range.
pub(crate) fn scale_pow2(mantissa: f64, exponent: i64) -> f64 {
    let mut result = mantissa;
    let mut remaining = exponent;
    while remaining > 1000 {
        result *= 2f64.powi(1000);
        remaining -= 1000;
    }
    while remaining < -1000 {
        result *= 2f64.powi(-1000);
        remaining += 1000;
    }
    // `remaining` is within [-1000, 1000] here.
    result * 2f64.powi(remaining as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_exact() {
        let (m, e) = decompose(0.75);
        assert_eq!(m, IBig::from(3));
        assert_eq!(e, -2);

        let (m, e) = decompose(-6.0);
        assert_eq!(m, IBig::from(-3));
        assert_eq!(e, 1);

        let (m, e) = decompose(0.0);
        assert_eq!(m, IBig::from(0));
        assert_eq!(e, 0);
    }

    #[test]
    fn test_scale_pow2() {
        assert_eq!(scale_pow2(3.0, -2), 0.75);
        assert_eq!(scale_pow2(1.0, 1023), f64::from_bits(0x7FE0_0000_0000_0000));
        assert_eq!(scale_pow2(1.0, -1074), f64::from_bits(1));
    }
}
