//! Row and column selectors for minors.

use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use smallvec::SmallVec;

use crate::error::{check_index, MatrixError, Result};

/// Resolved list of selected indices.
pub type Indices = SmallVec<[usize; 8]>;

/// Selects every row or column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct All;

/// Something that picks a subsequence of `0..extent`.
///
/// Indices may repeat and need not be sorted; a minor built from them
/// reads the selected lines in the given order.
pub trait Selector {
    /// Resolves the selection against a dimension of size `extent`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if a selected index is not below
    /// `extent`.
    fn resolve(&self, extent: usize) -> Result<Indices>;
}

impl Selector for All {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        Ok((0..extent).collect())
    }
}

impl Selector for RangeFull {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        All.resolve(extent)
    }
}

impl Selector for Range<usize> {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        if self.end > extent {
            return Err(MatrixError::IndexOutOfRange {
                index: self.end,
                extent,
            });
        }
        Ok(self.clone().collect())
    }
}

impl Selector for RangeInclusive<usize> {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        if self.is_empty() {
            return Ok(Indices::new());
        }
        check_index(*self.end(), extent)?;
        Ok(self.clone().collect())
    }
}

impl Selector for RangeFrom<usize> {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        (self.start..extent.max(self.start)).resolve(extent)
    }
}

impl Selector for RangeTo<usize> {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        (0..self.end).resolve(extent)
    }
}

impl Selector for RangeToInclusive<usize> {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        (0..=self.end).resolve(extent)
    }
}

impl Selector for [usize] {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        for &i in self {
            check_index(i, extent)?;
        }
        Ok(self.iter().copied().collect())
    }
}

impl<const N: usize> Selector for [usize; N] {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        self.as_slice().resolve(extent)
    }
}

impl Selector for Vec<usize> {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        self.as_slice().resolve(extent)
    }
}

impl<S: Selector + ?Sized> Selector for &S {
    fn resolve(&self, extent: usize) -> Result<Indices> {
        (**self).resolve(extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranges() {
        assert_eq!(All.resolve(3).unwrap().as_slice(), &[0, 1, 2]);
        assert_eq!((1..3).resolve(3).unwrap().as_slice(), &[1, 2]);
        assert_eq!((1..=2).resolve(3).unwrap().as_slice(), &[1, 2]);
        assert_eq!((2..).resolve(3).unwrap().as_slice(), &[2]);
        assert_eq!((..2).resolve(3).unwrap().as_slice(), &[0, 1]);
        assert!((3..).resolve(3).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            (1..4).resolve(3),
            Err(MatrixError::IndexOutOfRange { index: 4, extent: 3 })
        );
        assert!((4..).resolve(3).is_err());
        assert!((..=3).resolve(3).is_err());
        assert_eq!(
            [0, 5].resolve(2),
            Err(MatrixError::IndexOutOfRange { index: 5, extent: 2 })
        );
    }

    #[test]
    fn test_index_lists_keep_order() {
        assert_eq!([2, 0, 2].resolve(3).unwrap().as_slice(), &[2, 0, 2]);
        assert_eq!(vec![1].resolve(2).unwrap().as_slice(), &[1]);
    }
}
