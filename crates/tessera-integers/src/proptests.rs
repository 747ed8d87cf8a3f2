//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, NumericError, Rational, Sign};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rational() -> impl Strategy<Value = Rational> {
        prop_oneof![
            small_int().prop_map(Rational::from),
            (small_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d).unwrap()),
        ]
    }

    fn non_zero_rational() -> impl Strategy<Value = Rational> {
        (non_zero_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d).unwrap())
    }

    fn gcd(a: i64, b: i64) -> i64 {
        if b == 0 {
            a.abs()
        } else {
            gcd(b, a % b)
        }
    }

    fn is_canonical(r: &Rational) -> bool {
        let n = r.numerator();
        let d = r.denominator();
        d.signum() == 1 && (n.gcd(d).is_one() || (n.is_zero() && d.is_one()))
    }

    proptest! {
        // Integer ring axioms

        #[test]
        fn integer_add_commutative(a in small_int(), b in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn integer_distributive(a in small_int(), b in small_int(), c in small_int()) {
            let a = Integer::new(a);
            let b = Integer::new(b);
            let c = Integer::new(c);
            prop_assert_eq!(&a * &(&b + &c), &a * &b + &a * &c);
        }

        #[test]
        fn integer_div_rem_identity(a in small_int(), b in non_zero_int()) {
            let (q, r) = Integer::new(a).div_rem(&Integer::new(b)).unwrap();
            prop_assert_eq!(q.to_i64(), Some(a / b));
            prop_assert_eq!(r.to_i64(), Some(a % b));
        }

        #[test]
        fn integer_matches_i64(a in small_int(), b in small_int()) {
            prop_assert_eq!((Integer::new(a) * Integer::new(b)).to_i64(), Some(a * b));
            prop_assert_eq!(Integer::new(a).cmp(&Integer::new(b)), a.cmp(&b));
        }

        #[test]
        fn integer_gcd_lcm(a in non_zero_int(), b in non_zero_int()) {
            let (x, y) = (Integer::new(a), Integer::new(b));
            prop_assert_eq!(x.gcd(&y).to_i64(), Some(gcd(a, b)));
            prop_assert_eq!((&x.gcd(&y) * &x.lcm(&y)).to_i64(), Some((a * b).abs()));
        }

        #[test]
        fn integer_string_round_trip(a in any::<i64>()) {
            let x = Integer::new(a);
            prop_assert_eq!(x.to_string(), a.to_string());
            prop_assert_eq!(x.to_string().parse::<Integer>(), Ok(x));
        }

        // Rational field axioms

        #[test]
        fn rational_add_commutative(a in rational(), b in rational()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn rational_add_associative(a in rational(), b in rational(), c in rational()) {
            prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
        }

        #[test]
        fn rational_mul_associative(a in rational(), b in rational(), c in rational()) {
            prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
        }

        #[test]
        fn rational_distributive(a in rational(), b in rational(), c in rational()) {
            prop_assert_eq!(&a * &(&b + &c), &a * &b + &a * &c);
        }

        #[test]
        fn rational_additive_inverse(a in rational()) {
            prop_assert!((&a + &(-&a)).is_zero());
            prop_assert_eq!(&a - &a, Rational::zero());
        }

        #[test]
        fn rational_multiplicative_inverse(a in non_zero_rational()) {
            prop_assert!((&a * &a.recip().unwrap()).is_one());
            prop_assert!((&a / &a).is_one());
        }

        #[test]
        fn rational_div_then_mul(a in rational(), b in non_zero_rational()) {
            prop_assert_eq!(&(&a / &b) * &b, a);
        }

        // Canonical form

        #[test]
        fn rational_always_canonical(a in rational(), b in non_zero_rational(), k in -4i64..5) {
            prop_assert!(is_canonical(&a));
            prop_assert!(is_canonical(&(&a + &b)));
            prop_assert!(is_canonical(&(&a - &b)));
            prop_assert!(is_canonical(&(&a * &b)));
            prop_assert!(is_canonical(&(&a / &b)));
            prop_assert!(is_canonical(&b.pow(k).unwrap()));
        }

        #[test]
        fn rational_construction_reduces(n in small_int(), d in non_zero_int()) {
            let r = Rational::from_i64(n, d).unwrap();
            let g = gcd(n, d).max(1);
            let expected_den = (d / g).abs();
            prop_assert_eq!(r.denominator().to_i64(), Some(expected_den));
            prop_assert_eq!(r.numerator().to_i64(), Some(n / g * d.signum()));
        }

        #[test]
        fn rational_order_matches_cross_multiplication(a in rational(), b in rational()) {
            let lhs = a.numerator() * b.denominator();
            let rhs = b.numerator() * a.denominator();
            prop_assert_eq!(a.cmp(&b), lhs.cmp(&rhs));
        }

        #[test]
        fn rational_floor_ceil_bracket(a in rational()) {
            let floor = Rational::from(a.floor());
            let ceil = Rational::from(a.ceil());
            prop_assert!(floor <= a && a <= ceil);
            prop_assert!(&ceil - &floor <= Rational::one());
            prop_assert_eq!(a.is_integral(), floor == ceil);
        }

        #[test]
        fn integral_rounding_is_identity(n in small_int()) {
            let r = Rational::from(n);
            prop_assert_eq!(r.ceil(), Integer::new(n));
            prop_assert_eq!(r.floor(), Integer::new(n));
        }

        #[test]
        fn rational_string_round_trip(a in rational()) {
            prop_assert_eq!(a.to_string().parse::<Rational>(), Ok(a));
        }

        #[test]
        fn rational_f64_round_trip(x in -1.0e12f64..1.0e12) {
            let r = Rational::try_from(x).unwrap();
            prop_assert_eq!(r.to_f64(), x);
        }

        // Infinity algebra

        #[test]
        fn infinity_absorbs_finite(a in rational()) {
            let inf = Rational::infinity(Sign::Positive);
            let neg_inf = Rational::infinity(Sign::Negative);
            prop_assert_eq!(&inf + &a, inf.clone());
            prop_assert_eq!(&a - &inf, neg_inf.clone());
            prop_assert_eq!(&a / &inf, Rational::zero());
            prop_assert!(neg_inf < a && a < inf);
        }

        #[test]
        fn infinity_times_finite_sign(a in non_zero_rational()) {
            let inf = Rational::infinity(Sign::Positive);
            let product = &inf * &a;
            prop_assert!(!product.is_finite());
            prop_assert_eq!(product.inf_sign(), a.signum());
        }
    }

    #[test]
    fn infinity_nan_cases() {
        let inf = Rational::infinity(Sign::Positive);
        assert_eq!(inf.try_sub(&inf), Err(NumericError::NotANumber));
        assert_eq!(Rational::zero().try_mul(&inf), Err(NumericError::NotANumber));
        assert_eq!(inf.try_div(&inf), Err(NumericError::NotANumber));
    }
}
