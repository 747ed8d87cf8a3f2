//! Operator plumbing shared by `Integer` and `Rational`.
//!
//! Both types expose fallible `try_*` methods; the `std::ops` traits are
//! thin wrappers that panic with the error message when the fallible
//! method fails.

/// Implements `Op`/`OpAssign` for all owned/borrowed combinations of `$T`
/// in terms of `$T::$try(&self, &Self) -> Result<Self>`.
macro_rules! forward_fallible_binop {
    ($T:ident, $Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $try:ident) => {
        impl ::std::ops::$Op<&$T> for &$T {
            type Output = $T;

            #[track_caller]
            fn $op(self, rhs: &$T) -> $T {
                match self.$try(rhs) {
                    Ok(value) => value,
                    Err(err) => $crate::error::raise(err),
                }
            }
        }

        impl ::std::ops::$Op<$T> for &$T {
            type Output = $T;

            #[track_caller]
            fn $op(self, rhs: $T) -> $T {
                ::std::ops::$Op::$op(self, &rhs)
            }
        }

        impl ::std::ops::$Op<&$T> for $T {
            type Output = $T;

            #[track_caller]
            fn $op(self, rhs: &$T) -> $T {
                ::std::ops::$Op::$op(&self, rhs)
            }
        }

        impl ::std::ops::$Op for $T {
            type Output = $T;

            #[track_caller]
            fn $op(self, rhs: $T) -> $T {
                ::std::ops::$Op::$op(&self, &rhs)
            }
        }

        impl ::std::ops::$OpAssign<&$T> for $T {
            #[track_caller]
            fn $op_assign(&mut self, rhs: &$T) {
                *self = ::std::ops::$Op::$op(&*self, rhs);
            }
        }

        impl ::std::ops::$OpAssign for $T {
            #[track_caller]
            fn $op_assign(&mut self, rhs: $T) {
                *self = ::std::ops::$Op::$op(&*self, &rhs);
            }
        }
    };
}

pub(crate) use forward_fallible_binop;
