//! Dense vectors over a copy-on-write buffer.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Range, Sub, SubAssign};

use num_traits::Zero;
use tessera_core::{Ownership, SharedBuffer};

use crate::error::{check_dim, check_index, raise, MatrixError, Result};
use crate::views::{Line, LineMut};

/// A dense vector. Cloning shares the storage.
pub struct Vector<E> {
    buf: SharedBuffer<E>,
}

impl<E> Vector<E> {
    /// Creates an empty vector.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Wraps `data` without copying it.
    #[must_use]
    pub fn from_vec(data: Vec<E>) -> Self {
        Self {
            buf: SharedBuffer::from_vec(data, ()),
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the vector has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the element at `i`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `i >= self.dim()`.
    pub fn get(&self, i: usize) -> Result<&E> {
        check_index(i, self.dim())?;
        Ok(&self.as_slice()[i])
    }

    /// The elements. Never copies.
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        self.buf.as_slice()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.as_slice().iter()
    }

    /// The whole vector as a read-only line.
    #[must_use]
    pub fn as_line(&self) -> Line<'_, E> {
        Line::new(self.as_slice(), 0, 1, self.dim())
    }

    /// A read-only view of the elements in `range`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if the range reaches past the end.
    pub fn slice(&self, range: Range<usize>) -> Result<Line<'_, E>> {
        let len = self.checked_range(&range)?;
        Ok(Line::new(self.as_slice(), range.start, 1, len))
    }

    fn checked_range(&self, range: &Range<usize>) -> Result<usize> {
        if range.end > self.dim() {
            return Err(MatrixError::IndexOutOfRange {
                index: range.end,
                extent: self.dim(),
            });
        }
        Ok(range.end.saturating_sub(range.start))
    }

    /// Returns a new handle to the same storage. O(1).
    #[must_use]
    pub fn share(&self) -> Self {
        Self {
            buf: self.buf.share(),
        }
    }

    /// Reports whether the storage is shared with other handles.
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        self.buf.ownership()
    }

    /// Returns true if both handles use the same storage.
    #[must_use]
    pub fn is_same_storage(&self, other: &Self) -> bool {
        self.buf.is_same_body(&other.buf)
    }

    /// Exchanges the contents of two vectors. O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
    }

    /// Converts every element of `other` into `E`, in one pass.
    #[must_use]
    pub fn convert_from<E2>(other: &Vector<E2>) -> Self
    where
        E2: Clone,
        E: From<E2>,
    {
        other.iter().cloned().map(E::from).collect()
    }
}

impl<E: Clone> Vector<E> {
    /// Returns the element at `i` mutably.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if `i >= self.dim()`.
    pub fn get_mut(&mut self, i: usize) -> Result<&mut E> {
        check_index(i, self.dim())?;
        Ok(&mut self.as_mut_slice()[i])
    }

    /// The elements, writable. Divorces shared storage once.
    pub fn as_mut_slice(&mut self) -> &mut [E] {
        self.buf.as_mut_slice()
    }

    /// A writable view of the elements in `range`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if the range reaches past the end.
    /// Nothing is copied in that case.
    pub fn slice_mut(&mut self, range: Range<usize>) -> Result<LineMut<'_, E>> {
        let len = self.checked_range(&range)?;
        Ok(LineMut::new(self.as_mut_slice(), range.start, 1, len))
    }

    /// Appends one element.
    pub fn push(&mut self, value: E) {
        self.buf.append([value]);
    }

    /// Appends the elements of `values`.
    pub fn append(&mut self, values: &[E]) {
        self.buf.append(values.iter().cloned());
    }

    /// Consumes the vector, copying only if the storage is shared.
    #[must_use]
    pub fn into_vec(self) -> Vec<E> {
        self.buf.into_vec()
    }
}

impl<E: Clone + Zero> Vector<E> {
    /// Creates a vector of `n` zeros.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self::from_vec(vec![E::zero(); n])
    }

    /// Changes the length, truncating or zero-filling.
    ///
    /// # Errors
    ///
    /// [`MatrixError::Buffer`] if the storage cannot grow.
    pub fn resize(&mut self, n: usize) -> Result<()> {
        self.buf.try_resize_with(n, E::zero)?;
        Ok(())
    }
}

impl<E: Clone + Zero + Mul<Output = E>> Vector<E> {
    /// Inner product.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the lengths differ.
    pub fn dot(&self, other: &Self) -> Result<E> {
        self.as_line().dot(&other.as_line())
    }

    /// Multiplies every element by `scalar`.
    #[must_use]
    pub fn scale(&self, scalar: &E) -> Self {
        self.iter().map(|x| x.clone() * scalar.clone()).collect()
    }
}

impl<E: Clone + Add<Output = E>> Vector<E> {
    /// Adds `other` element-wise in place.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the lengths differ. `self` is
    /// unchanged in that case.
    pub fn try_add_assign(&mut self, other: &Self) -> Result<()> {
        check_dim(self.dim(), other.dim())?;
        for (x, y) in self.as_mut_slice().iter_mut().zip(other.iter()) {
            *x = x.clone() + y.clone();
        }
        Ok(())
    }
}

impl<E: Clone + Sub<Output = E>> Vector<E> {
    /// Subtracts `other` element-wise in place.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the lengths differ. `self` is
    /// unchanged in that case.
    pub fn try_sub_assign(&mut self, other: &Self) -> Result<()> {
        check_dim(self.dim(), other.dim())?;
        for (x, y) in self.as_mut_slice().iter_mut().zip(other.iter()) {
            *x = x.clone() - y.clone();
        }
        Ok(())
    }
}

impl<E> Default for Vector<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Vector<E> {
    /// Shares the storage; see [`Vector::share`].
    fn clone(&self) -> Self {
        self.share()
    }
}

impl<E: PartialEq> PartialEq for Vector<E> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<E: Eq> Eq for Vector<E> {}

impl<E: fmt::Debug> fmt::Debug for Vector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vector").field(&self.as_slice()).finish()
    }
}

/// Entries separated by single spaces.
impl<E: fmt::Display> fmt::Display for Vector<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, x) in self.iter().enumerate() {
            if k > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(x, f)?;
        }
        Ok(())
    }
}

impl<E> From<Vec<E>> for Vector<E> {
    fn from(data: Vec<E>) -> Self {
        Self::from_vec(data)
    }
}

impl<E> FromIterator<E> for Vector<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, E> IntoIterator for &'a Vector<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E> Index<usize> for Vector<E> {
    type Output = E;

    #[track_caller]
    fn index(&self, i: usize) -> &E {
        #[cfg(any(feature = "bounds-check", debug_assertions))]
        if let Err(err) = check_index(i, self.dim()) {
            raise(err);
        }
        &self.as_slice()[i]
    }
}

impl<E: Clone> IndexMut<usize> for Vector<E> {
    #[track_caller]
    fn index_mut(&mut self, i: usize) -> &mut E {
        #[cfg(any(feature = "bounds-check", debug_assertions))]
        if let Err(err) = check_index(i, self.dim()) {
            raise(err);
        }
        &mut self.as_mut_slice()[i]
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the lengths differ.
impl<E: Clone + Add<Output = E>> AddAssign<&Vector<E>> for Vector<E> {
    #[track_caller]
    fn add_assign(&mut self, other: &Vector<E>) {
        if let Err(err) = self.try_add_assign(other) {
            raise(err);
        }
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the lengths differ.
impl<E: Clone + Sub<Output = E>> SubAssign<&Vector<E>> for Vector<E> {
    #[track_caller]
    fn sub_assign(&mut self, other: &Vector<E>) {
        if let Err(err) = self.try_sub_assign(other) {
            raise(err);
        }
    }
}

impl<E: Clone + Mul<Output = E>> MulAssign<&E> for Vector<E> {
    fn mul_assign(&mut self, scalar: &E) {
        for x in self.as_mut_slice() {
            *x = x.clone() * scalar.clone();
        }
    }
}

impl<E2: Clone, E: From<E2>> From<&Vector<E2>> for Vector<E> {
    fn from(other: &Vector<E2>) -> Self {
        Self::convert_from(other)
    }
}
