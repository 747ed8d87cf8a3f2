//! Borrowed views into matrix and vector storage.
//!
//! Views never own elements. Read views ([`Line`], [`Minor`]) borrow the
//! container immutably and never trigger a copy. Write views
//! ([`LineMut`], [`MinorMut`]) are created from `&mut` access, which
//! divorces a shared buffer once; afterwards every write goes straight
//! into the owner's storage. The borrow keeps the owner from being
//! resized or dropped while the view lives.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use crate::error::{check_dim, check_index, raise, Result};
use crate::matrix::Matrix;
use crate::select::Indices;
use crate::vector::Vector;

/// A strided read-only sequence: a matrix row or column, or a vector slice.
pub struct Line<'a, E> {
    data: &'a [E],
    start: usize,
    stride: usize,
    len: usize,
}

impl<E> Clone for Line<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Line<'_, E> {}

/// A matrix row.
pub type Row<'a, E> = Line<'a, E>;
/// A matrix column.
pub type Col<'a, E> = Line<'a, E>;

impl<'a, E> Line<'a, E> {
    pub(crate) fn new(data: &'a [E], start: usize, stride: usize, len: usize) -> Self {
        debug_assert!(len == 0 || start + (len - 1) * stride < data.len());
        Self {
            data,
            start,
            stride: stride.max(1),
            len,
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the line has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the `k`-th element.
    #[must_use]
    pub fn get(&self, k: usize) -> Option<&'a E> {
        let data = self.data;
        (k < self.len).then(|| &data[self.start + k * self.stride])
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &'a E> + 'a {
        self.data
            .get(self.start..)
            .unwrap_or(&[])
            .iter()
            .step_by(self.stride)
            .take(self.len)
    }

    /// Copies the elements into a new vector.
    #[must_use]
    pub fn to_vector(&self) -> Vector<E>
    where
        E: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Inner product with another line.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
    /// if the lengths differ.
    pub fn dot(&self, other: &Line<'_, E>) -> Result<E>
    where
        E: Clone + num_traits::Zero + Mul<Output = E>,
    {
        check_dim(self.len, other.len)?;
        Ok(self
            .iter()
            .zip(other.iter())
            .fold(E::zero(), |acc, (a, b)| acc + a.clone() * b.clone()))
    }
}

impl<E> Index<usize> for Line<'_, E> {
    type Output = E;

    #[track_caller]
    fn index(&self, k: usize) -> &E {
        if let Err(err) = check_index(k, self.len) {
            raise(err);
        }
        &self.data[self.start + k * self.stride]
    }
}

impl<E: PartialEq> PartialEq for Line<'_, E> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<E: PartialEq> PartialEq<[E]> for Line<'_, E> {
    fn eq(&self, other: &[E]) -> bool {
        self.len == other.len() && self.iter().eq(other.iter())
    }
}

impl<E: fmt::Debug> fmt::Debug for Line<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// A strided writable sequence: a matrix row or column, or a vector slice.
///
/// Supports element-wise `+=`/`-=` with a [`Line`] or slice of the same
/// length, and scalar `*=`.
pub struct LineMut<'a, E> {
    data: &'a mut [E],
    start: usize,
    stride: usize,
    len: usize,
}

/// A writable matrix row.
pub type RowMut<'a, E> = LineMut<'a, E>;
/// A writable matrix column.
pub type ColMut<'a, E> = LineMut<'a, E>;

impl<'a, E> LineMut<'a, E> {
    pub(crate) fn new(data: &'a mut [E], start: usize, stride: usize, len: usize) -> Self {
        debug_assert!(len == 0 || start + (len - 1) * stride < data.len());
        Self {
            data,
            start,
            stride: stride.max(1),
            len,
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the line has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reborrows as a read-only line.
    #[must_use]
    pub fn as_line(&self) -> Line<'_, E> {
        Line::new(self.data, self.start, self.stride, self.len)
    }

    /// Returns the `k`-th element.
    #[must_use]
    pub fn get(&self, k: usize) -> Option<&E> {
        (k < self.len).then(|| &self.data[self.start + k * self.stride])
    }

    /// Returns the `k`-th element mutably.
    pub fn get_mut(&mut self, k: usize) -> Option<&mut E> {
        if k < self.len {
            Some(&mut self.data[self.start + k * self.stride])
        } else {
            None
        }
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.as_line().iter()
    }

    /// Iterates mutably over the elements.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut E> {
        let len = self.len;
        let stride = self.stride;
        let start = self.start.min(self.data.len());
        self.data[start..].iter_mut().step_by(stride).take(len)
    }

    /// Sets every element to `value`.
    pub fn fill(&mut self, value: &E)
    where
        E: Clone,
    {
        for x in self.iter_mut() {
            x.clone_from(value);
        }
    }

    /// Overwrites the elements with the values of `src`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
    /// if the lengths differ.
    pub fn assign(&mut self, src: &[E]) -> Result<()>
    where
        E: Clone,
    {
        check_dim(self.len, src.len())?;
        for (x, v) in self.iter_mut().zip(src) {
            x.clone_from(v);
        }
        Ok(())
    }

    fn zip_apply<'b, I>(&mut self, other: I, other_len: usize, f: impl Fn(&mut E, &'b E))
    where
        I: Iterator<Item = &'b E>,
        E: 'b,
    {
        if let Err(err) = check_dim(self.len, other_len) {
            raise(err);
        }
        for (x, v) in self.iter_mut().zip(other) {
            f(x, v);
        }
    }
}

impl<E> Index<usize> for LineMut<'_, E> {
    type Output = E;

    #[track_caller]
    fn index(&self, k: usize) -> &E {
        if let Err(err) = check_index(k, self.len) {
            raise(err);
        }
        &self.data[self.start + k * self.stride]
    }
}

impl<E> IndexMut<usize> for LineMut<'_, E> {
    #[track_caller]
    fn index_mut(&mut self, k: usize) -> &mut E {
        if let Err(err) = check_index(k, self.len) {
            raise(err);
        }
        &mut self.data[self.start + k * self.stride]
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the lengths differ.
impl<'b, E: Clone + Add<Output = E>> AddAssign<Line<'b, E>> for LineMut<'_, E> {
    #[track_caller]
    fn add_assign(&mut self, rhs: Line<'b, E>) {
        self.zip_apply(rhs.iter(), rhs.len(), |x, v| *x = x.clone() + v.clone());
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the lengths differ.
impl<E: Clone + Add<Output = E>> AddAssign<&[E]> for LineMut<'_, E> {
    #[track_caller]
    fn add_assign(&mut self, rhs: &[E]) {
        self.zip_apply(rhs.iter(), rhs.len(), |x, v| *x = x.clone() + v.clone());
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the lengths differ.
impl<'b, E: Clone + Sub<Output = E>> SubAssign<Line<'b, E>> for LineMut<'_, E> {
    #[track_caller]
    fn sub_assign(&mut self, rhs: Line<'b, E>) {
        self.zip_apply(rhs.iter(), rhs.len(), |x, v| *x = x.clone() - v.clone());
    }
}

impl<E: Clone + Mul<Output = E>> MulAssign<&E> for LineMut<'_, E> {
    fn mul_assign(&mut self, rhs: &E) {
        for x in self.iter_mut() {
            *x = x.clone() * rhs.clone();
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for LineMut<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_line(), f)
    }
}

/// Read-only view of selected rows and columns of a matrix.
pub struct Minor<'a, E> {
    matrix: &'a Matrix<E>,
    rows: Indices,
    cols: Indices,
}

impl<'a, E> Minor<'a, E> {
    pub(crate) fn new(matrix: &'a Matrix<E>, rows: Indices, cols: Indices) -> Self {
        Self { matrix, rows, cols }
    }

    /// Number of selected rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of selected columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols.len()
    }

    /// Element at `(i, j)` of the minor.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<&'a E> {
        let (&r, &c) = (self.rows.get(i)?, self.cols.get(j)?);
        self.matrix.get(r, c).ok()
    }

    /// Iterates over the selected rows, each as an iterator over the
    /// selected columns.
    pub fn row_iter(&self) -> impl Iterator<Item = impl Iterator<Item = &'a E> + '_> + '_ {
        let data = self.matrix.as_slice();
        let stride = self.matrix.cols();
        self.rows
            .iter()
            .map(move |&r| self.cols.iter().map(move |&c| &data[r * stride + c]))
    }

    /// Copies the minor into a new matrix.
    #[must_use]
    pub fn to_matrix(&self) -> Matrix<E>
    where
        E: Clone,
    {
        let data = self.row_iter().flatten().cloned().collect();
        Matrix::from_parts(self.rows(), self.cols(), data)
    }
}

impl<E> Index<(usize, usize)> for Minor<'_, E> {
    type Output = E;

    #[track_caller]
    fn index(&self, (i, j): (usize, usize)) -> &E {
        if let Err(err) = check_index(i, self.rows()).and(check_index(j, self.cols())) {
            raise(err);
        }
        &self.matrix[(self.rows[i], self.cols[j])]
    }
}

/// Writable view of selected rows and columns of a matrix.
///
/// Holds the owner's storage exclusively for its lifetime; the owner's
/// buffer is divorced at most once, when the view is created.
pub struct MinorMut<'a, E> {
    data: &'a mut [E],
    stride: usize,
    rows: Indices,
    cols: Indices,
}

impl<'a, E> MinorMut<'a, E> {
    pub(crate) fn new(data: &'a mut [E], stride: usize, rows: Indices, cols: Indices) -> Self {
        Self {
            data,
            stride,
            rows,
            cols,
        }
    }

    /// Number of selected rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of selected columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols.len()
    }

    fn offset(&self, i: usize, j: usize) -> Option<usize> {
        Some(self.rows.get(i)? * self.stride + self.cols.get(j)?)
    }

    /// Element at `(i, j)` of the minor.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<&E> {
        self.offset(i, j).map(|k| &self.data[k])
    }

    /// Mutable element at `(i, j)` of the minor.
    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut E> {
        let k = self.offset(i, j)?;
        Some(&mut self.data[k])
    }

    /// Sets every selected element to `value`.
    pub fn fill(&mut self, value: &E)
    where
        E: Clone,
    {
        self.apply(|x| x.clone_from(value));
    }

    /// Overwrites the selection with the contents of `src`.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`](crate::MatrixError::DimensionMismatch)
    /// if `src` does not have the shape of the minor.
    pub fn assign(&mut self, src: &Matrix<E>) -> Result<()>
    where
        E: Clone,
    {
        self.zip_with(src, |x, v| x.clone_from(v))
    }

    /// Adds `src` element-wise into the selection.
    ///
    /// # Errors
    ///
    /// As for [`MinorMut::assign`].
    pub fn add_assign_matrix(&mut self, src: &Matrix<E>) -> Result<()>
    where
        E: Clone + Add<Output = E>,
    {
        self.zip_with(src, |x, v| *x = x.clone() + v.clone())
    }

    fn apply(&mut self, mut f: impl FnMut(&mut E)) {
        for &r in &self.rows {
            for &c in &self.cols {
                f(&mut self.data[r * self.stride + c]);
            }
        }
    }

    fn zip_with(&mut self, src: &Matrix<E>, f: impl Fn(&mut E, &E)) -> Result<()> {
        check_dim(self.rows(), src.rows())?;
        check_dim(self.cols(), src.cols())?;
        for (i, &r) in self.rows.iter().enumerate() {
            for (j, &c) in self.cols.iter().enumerate() {
                f(&mut self.data[r * self.stride + c], &src[(i, j)]);
            }
        }
        Ok(())
    }
}

impl<E: Clone + Mul<Output = E>> MulAssign<&E> for MinorMut<'_, E> {
    fn mul_assign(&mut self, rhs: &E) {
        self.apply(|x| *x = x.clone() * rhs.clone());
    }
}

impl<E> Index<(usize, usize)> for MinorMut<'_, E> {
    type Output = E;

    #[track_caller]
    fn index(&self, (i, j): (usize, usize)) -> &E {
        if let Err(err) = check_index(i, self.rows()).and(check_index(j, self.cols())) {
            raise(err);
        }
        &self.data[self.rows[i] * self.stride + self.cols[j]]
    }
}

impl<E> IndexMut<(usize, usize)> for MinorMut<'_, E> {
    #[track_caller]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut E {
        if let Err(err) = check_index(i, self.rows()).and(check_index(j, self.cols())) {
            raise(err);
        }
        &mut self.data[self.rows[i] * self.stride + self.cols[j]]
    }
}
