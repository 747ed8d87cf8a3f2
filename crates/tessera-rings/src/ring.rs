//! Ring handles.

use std::fmt;

use crate::error::Result;
use crate::repository::{self, Names, RingId};

/// A polynomial ring, identified by its interned [`RingId`].
///
/// Handles are `Copy` and compare by id. Two rings built from the same
/// variable names over the same coefficient ring are the same ring.
///
/// ```
/// use tessera_rings::Ring;
///
/// let r = Ring::new(&["x", "y"]);
/// assert_eq!(r, Ring::new(&["x", "y"]));
/// assert_ne!(r, Ring::new(&["y", "x"]));
/// assert_eq!(r.n_vars(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ring {
    id: RingId,
}

impl Ring {
    /// The ring with the given variables over the base coefficients.
    #[must_use]
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            id: repository::intern(names, None),
        }
    }

    /// The ring with `n` generated variables `prefix0, ..`, or the single
    /// variable `prefix` when `n == 1`.
    #[must_use]
    pub fn with_arity(n: usize, prefix: &str) -> Self {
        Self {
            id: repository::intern_by_arity(prefix, n, None),
        }
    }

    /// The ring with the given variables whose coefficients live in `coeff`.
    #[must_use]
    pub fn with_coefficients<S: AsRef<str>>(coeff: &Ring, names: &[S]) -> Self {
        Self {
            id: repository::intern(names, Some(coeff.id)),
        }
    }

    /// As [`Ring::with_arity`], over the coefficient ring `coeff`.
    #[must_use]
    pub fn with_coefficients_arity(coeff: &Ring, n: usize, prefix: &str) -> Self {
        Self {
            id: repository::intern_by_arity(prefix, n, Some(coeff.id)),
        }
    }

    /// Rebuilds a handle from an id.
    #[must_use]
    pub fn from_id(id: RingId) -> Self {
        Self { id }
    }

    /// The interned id.
    #[must_use]
    pub fn id(&self) -> RingId {
        self.id
    }

    /// The variable names, in order.
    #[must_use]
    pub fn names(&self) -> Names {
        repository::names(self.id)
    }

    /// Number of variables.
    #[must_use]
    pub fn n_vars(&self) -> usize {
        self.names().len()
    }

    /// The ring the coefficients live in, or `None` for the rationals.
    #[must_use]
    pub fn coefficient_ring(&self) -> Option<Ring> {
        repository::coefficient_ring(self.id).map(Self::from_id)
    }

    /// Names used when printing. Falls back to [`Ring::names`].
    #[must_use]
    pub fn pretty_names(&self) -> Names {
        repository::pretty_names(self.id)
    }

    /// Overrides the names used when printing. Every handle to this ring
    /// sees the change.
    ///
    /// # Errors
    ///
    /// [`RingError::WrongArity`](crate::RingError::WrongArity) if the count
    /// differs from [`Ring::n_vars`].
    pub fn set_pretty_names<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        repository::set_pretty_names(self.id, names)
    }
}

impl fmt::Debug for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("id", &self.id)
            .field("names", &self.names())
            .field("coeff", &self.coefficient_ring().map(|r| r.id))
            .finish()
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(coeff) = self.coefficient_ring() {
            write!(f, "{coeff}")?;
        } else {
            f.write_str("Q")?;
        }
        f.write_str("[")?;
        for (i, name) in self.pretty_names().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RingError;

    #[test]
    fn test_name_order_is_identity() {
        let a = Ring::new(&["gx", "gy"]);
        let b = Ring::new(&["gx", "gy"]);
        let c = Ring::new(&["gy", "gx"]);
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
        assert_ne!(a, c);
        assert_eq!(Ring::from_id(a.id()), a);
    }

    #[test]
    fn test_arity() {
        let r = Ring::with_arity(4, "v");
        assert_eq!(r.n_vars(), 4);
        assert_eq!(&*r.names()[3], "v3");
        assert_eq!(Ring::with_arity(4, "v"), r);
        assert_eq!(Ring::with_arity(1, "v").names().len(), 1);
        assert_eq!(&*Ring::with_arity(1, "v").names()[0], "v");
    }

    #[test]
    fn test_tower() {
        let base = Ring::new(&["t"]);
        let over = Ring::with_coefficients(&base, &["hx"]);
        assert_eq!(over.coefficient_ring(), Some(base));
        assert_ne!(over, Ring::new(&["hx"]));
        assert_eq!(over.to_string(), "Q[t][hx]");

        let generated = Ring::with_coefficients_arity(&base, 2, "hz");
        assert_eq!(generated.coefficient_ring(), Some(base));
        assert_eq!(generated, Ring::with_coefficients(&base, &["hz0", "hz1"]));
    }

    #[test]
    fn test_pretty_names_shared_by_handles() {
        let a = Ring::new(&["qa", "qb"]);
        let b = Ring::new(&["qa", "qb"]);
        assert_eq!(
            a.set_pretty_names(&["x"]),
            Err(RingError::WrongArity {
                expected: 2,
                found: 1
            })
        );
        a.set_pretty_names(&["p", "q"]).unwrap();
        assert_eq!(b.to_string(), "Q[p, q]");
        assert_eq!(&*b.names()[0], "qa");
    }
}
