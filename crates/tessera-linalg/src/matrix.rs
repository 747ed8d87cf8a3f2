//! Dense matrices stored in row-major order in a shared buffer.
//!
//! Cloning a matrix shares its storage; the first write through either
//! handle gives the writer a private copy. Rows, columns, and minors are
//! borrowed views, not storage.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

use log::trace;
use num_traits::{One, Zero};
use tessera_core::{BufferError, Ownership, SharedBuffer};

use crate::error::{check_dim, check_index, raise, MatrixError, Result};
use crate::select::Selector;
use crate::vector::Vector;
use crate::views::{Col, ColMut, Line, LineMut, Minor, MinorMut, Row, RowMut};

/// Row and column counts, kept in the buffer prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dim {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

/// Dense matrix stored in row-major order.
pub struct Matrix<E> {
    buf: SharedBuffer<E, Dim>,
}

impl<E> Matrix<E> {
    /// Creates an empty 0×0 matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(0, 0, Vec::new())
    }

    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<E>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self {
            buf: SharedBuffer::from_vec(data, Dim { rows, cols }),
        }
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<E>) -> Result<Self> {
        let expected = rows.checked_mul(cols).unwrap_or(usize::MAX);
        check_dim(expected, data.len())?;
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Creates a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<E>>) -> Result<Self> {
        let num_rows = rows.len();
        let num_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(num_rows * num_cols);
        for row in rows {
            check_dim(num_cols, row.len())?;
            data.extend(row);
        }
        Ok(Self::from_parts(num_rows, num_cols, data))
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.buf.prefix().rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.buf.prefix().cols
    }

    /// Returns both dimensions.
    #[must_use]
    pub fn dim(&self) -> Dim {
        *self.buf.prefix()
    }

    /// Checks if the matrix is square.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    /// Returns true if the matrix has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn check(&self, i: usize, j: usize) -> Result<()> {
        check_index(i, self.rows())?;
        check_index(j, self.cols())
    }

    /// Returns a reference to the entry at (row, col).
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if either index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Result<&E> {
        self.check(i, j)?;
        Ok(&self.buf.as_slice()[i * self.cols() + j])
    }

    /// All elements in row-major order. Never copies.
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        self.buf.as_slice()
    }

    /// The matrix read as one flat vector of its rows.
    #[must_use]
    pub fn concat_rows(&self) -> Line<'_, E> {
        Line::new(self.as_slice(), 0, 1, self.buf.len())
    }

    fn row_slice(&self, i: usize) -> &[E] {
        let cols = self.cols();
        &self.as_slice()[i * cols..(i + 1) * cols]
    }

    /// Returns a view of row `i`.
    ///
    /// # Panics
    ///
    /// Panics with `IndexOutOfRange` if `i >= self.rows()`.
    #[must_use]
    #[track_caller]
    pub fn row(&self, i: usize) -> Row<'_, E> {
        if let Err(err) = check_index(i, self.rows()) {
            raise(err);
        }
        Line::new(self.as_slice(), i * self.cols(), 1, self.cols())
    }

    /// Returns a view of column `j`.
    ///
    /// # Panics
    ///
    /// Panics with `IndexOutOfRange` if `j >= self.cols()`.
    #[must_use]
    #[track_caller]
    pub fn col(&self, j: usize) -> Col<'_, E> {
        if let Err(err) = check_index(j, self.cols()) {
            raise(err);
        }
        Line::new(self.as_slice(), j, self.cols(), self.rows())
    }

    /// Iterates over the rows.
    pub fn row_iter(&self) -> impl Iterator<Item = Row<'_, E>> {
        (0..self.rows()).map(move |i| self.row(i))
    }

    /// Iterates over the columns.
    pub fn col_iter(&self) -> impl Iterator<Item = Col<'_, E>> {
        (0..self.cols()).map(move |j| self.col(j))
    }

    /// Returns a read-only view of the selected rows and columns.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if a selector reaches outside the
    /// matrix.
    pub fn minor<R: Selector, C: Selector>(&self, rows: R, cols: C) -> Result<Minor<'_, E>> {
        let rows = rows.resolve(self.rows())?;
        let cols = cols.resolve(self.cols())?;
        Ok(Minor::new(self, rows, cols))
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

    /// Exchanges the contents of two matrices. O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
    }

    /// Makes this the empty 0×0 matrix, releasing its share of the storage.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Converts every element of `other` into `E`, in one pass.
    #[must_use]
    pub fn convert_from<E2>(other: &Matrix<E2>) -> Self
    where
        E2: Clone,
        E: From<E2>,
    {
        let data = other.as_slice().iter().cloned().map(E::from).collect();
        Self::from_parts(other.rows(), other.cols(), data)
    }
}

impl<E: Clone> Matrix<E> {
    /// Returns a mutable reference to the entry at (row, col).
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if either index is out of bounds.
    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut E> {
        self.check(i, j)?;
        let cols = self.cols();
        Ok(&mut self.buf.as_mut_slice()[i * cols + j])
    }

    /// All elements in row-major order, writable. Divorces shared storage
    /// once.
    pub fn as_mut_slice(&mut self) -> &mut [E] {
        self.buf.as_mut_slice()
    }

    /// The matrix as one flat writable vector of its rows.
    pub fn concat_rows_mut(&mut self) -> LineMut<'_, E> {
        let len = self.buf.len();
        LineMut::new(self.as_mut_slice(), 0, 1, len)
    }

    /// Returns a writable view of row `i`.
    ///
    /// # Panics
    ///
    /// Panics with `IndexOutOfRange` if `i >= self.rows()`.
    #[track_caller]
    pub fn row_mut(&mut self, i: usize) -> RowMut<'_, E> {
        if let Err(err) = check_index(i, self.rows()) {
            raise(err);
        }
        let cols = self.cols();
        LineMut::new(self.as_mut_slice(), i * cols, 1, cols)
    }

    /// Returns a writable view of column `j`.
    ///
    /// # Panics
    ///
    /// Panics with `IndexOutOfRange` if `j >= self.cols()`.
    #[track_caller]
    pub fn col_mut(&mut self, j: usize) -> ColMut<'_, E> {
        if let Err(err) = check_index(j, self.cols()) {
            raise(err);
        }
        let Dim { rows, cols } = self.dim();
        LineMut::new(self.as_mut_slice(), j, cols, rows)
    }

    /// Returns a writable view of the selected rows and columns.
    ///
    /// The storage is divorced, if shared, before the view is returned;
    /// writes through the view then go straight into this matrix.
    ///
    /// # Errors
    ///
    /// [`MatrixError::IndexOutOfRange`] if a selector reaches outside the
    /// matrix. Nothing is copied in that case.
    pub fn minor_mut<R: Selector, C: Selector>(
        &mut self,
        rows: R,
        cols: C,
    ) -> Result<MinorMut<'_, E>> {
        let rows = rows.resolve(self.rows())?;
        let cols = cols.resolve(self.cols())?;
        let stride = self.cols();
        Ok(MinorMut::new(self.as_mut_slice(), stride, rows, cols))
    }

    /// Returns the transpose of the matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let data = self.col_iter().flat_map(|col| col.iter().cloned()).collect();
        Self::from_parts(self.cols(), self.rows(), data)
    }

    /// Swaps two rows in-place.
    ///
    /// # Panics
    ///
    /// Panics with `IndexOutOfRange` if either row is out of bounds.
    #[track_caller]
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        let rows = self.rows();
        if let Err(err) = check_index(i, rows).and(check_index(j, rows)) {
            raise(err);
        }
        if i == j {
            return;
        }
        let cols = self.cols();
        let data = self.as_mut_slice();
        for k in 0..cols {
            data.swap(i * cols + k, j * cols + k);
        }
    }

    /// Appends a row at the bottom.
    ///
    /// A 0×0 matrix takes its column count from the row.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the row length differs from
    /// the column count.
    pub fn append_row(&mut self, row: &[E]) -> Result<()> {
        self.append_flat(1, row.len(), row)
    }

    /// Appends the rows of `other` at the bottom.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the column counts differ.
    pub fn append_rows(&mut self, other: &Matrix<E>) -> Result<()> {
        self.append_flat(other.rows(), other.cols(), other.as_slice())
    }

    fn append_flat(&mut self, rows: usize, cols: usize, data: &[E]) -> Result<()> {
        let Dim { rows: r, cols: c } = self.dim();
        let cols = if r == 0 && c == 0 {
            cols
        } else {
            check_dim(c, cols)?;
            c
        };
        let (dim, buf) = self.buf.unshare_for_write();
        buf.extend_from_slice(data);
        *dim = Dim {
            rows: r + rows,
            cols,
        };
        Ok(())
    }

    /// Appends a column on the right.
    ///
    /// A 0×0 matrix takes its row count from the column.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the column length differs from
    /// the row count.
    pub fn append_col(&mut self, col: &[E]) -> Result<()> {
        let rows = self.rows_for_append(col.len())?;
        self.interleave(rows, 1, |i| std::slice::from_ref(&col[i]));
        Ok(())
    }

    /// Appends the columns of `other` on the right.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the row counts differ.
    pub fn append_cols(&mut self, other: &Matrix<E>) -> Result<()> {
        let rows = self.rows_for_append(other.rows())?;
        self.interleave(rows, other.cols(), |i| other.row_slice(i));
        Ok(())
    }

    fn rows_for_append(&self, found: usize) -> Result<usize> {
        let Dim { rows, cols } = self.dim();
        if rows == 0 && cols == 0 {
            return Ok(found);
        }
        check_dim(rows, found)?;
        Ok(rows)
    }

    /// Rebuilds the storage with `extra` columns taken from `tail(i)`
    /// after each row `i`.
    fn interleave<'t>(&mut self, rows: usize, extra: usize, tail: impl Fn(usize) -> &'t [E])
    where
        E: 't,
    {
        let cols = self.cols();
        trace!("appending {extra} columns to {rows}x{cols} matrix");
        let mut data = Vec::with_capacity(rows * (cols + extra));
        for i in 0..rows {
            if cols > 0 {
                data.extend_from_slice(self.row_slice(i));
            }
            data.extend_from_slice(tail(i));
        }
        *self = Self::from_parts(rows, cols + extra, data);
    }
}

impl<E: Clone + Zero> Matrix<E> {
    /// Creates a new matrix filled with zeros.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` elements cannot be allocated; see
    /// [`Matrix::try_zeros`].
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        match Self::try_zeros(rows, cols) {
            Ok(m) => m,
            Err(err) => raise(err),
        }
    }

    /// Creates a new matrix filled with zeros.
    ///
    /// # Errors
    ///
    /// [`MatrixError::Buffer`] if `rows * cols` overflows or cannot be
    /// allocated.
    pub fn try_zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BufferError::OutOfMemory { requested: len })?;
        data.resize(len, E::zero());
        Ok(Self::from_parts(rows, cols, data))
    }

    /// Creates an identity matrix.
    #[must_use]
    pub fn identity(n: usize) -> Self
    where
        E: One,
    {
        let mut m = Self::zeros(n, n);
        let data = m.as_mut_slice();
        for i in 0..n {
            data[i * n + i] = E::one();
        }
        m
    }

    /// Changes the shape to `rows × cols`.
    ///
    /// With an unchanged column count the storage is reused: trailing rows
    /// are dropped or zero-filled. Otherwise a new buffer is built holding
    /// the top-left overlap of the old contents, zero-filled elsewhere.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails; see [`Matrix::try_resize`].
    pub fn resize(&mut self, rows: usize, cols: usize) {
        if let Err(err) = self.try_resize(rows, cols) {
            raise(err);
        }
    }

    /// Changes the shape to `rows × cols`; see [`Matrix::resize`].
    ///
    /// # Errors
    ///
    /// [`MatrixError::Buffer`] if the new storage cannot be allocated. The
    /// matrix is unchanged in that case.
    pub fn try_resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        let Dim { rows: r, cols: c } = self.dim();
        if (rows, cols) == (r, c) {
            return Ok(());
        }
        let len = element_count(rows, cols)?;

        if cols == c {
            self.buf.try_resize_with(len, E::zero)?;
            self.buf.prefix_mut().rows = rows;
            return Ok(());
        }

        trace!("rebuilding {r}x{c} matrix as {rows}x{cols}");
        let keep = cols.min(c);
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BufferError::OutOfMemory { requested: len })?;
        for i in 0..rows {
            if i < r {
                data.extend_from_slice(&self.row_slice(i)[..keep]);
            }
            data.resize_with((i + 1) * cols, E::zero);
        }
        *self = Self::from_parts(rows, cols, data);
        Ok(())
    }

    /// Changes the number of rows, keeping the column count.
    pub fn resize_rows(&mut self, rows: usize) {
        self.resize(rows, self.cols());
    }

    /// Changes the number of columns, keeping the row count.
    pub fn resize_cols(&mut self, cols: usize) {
        self.resize(self.rows(), cols);
    }
}

impl<E: Clone + Zero + Mul<Output = E>> Matrix<E> {
    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if `x.dim() != self.cols()`.
    pub fn mv(&self, x: &Vector<E>) -> Result<Vector<E>> {
        check_dim(self.cols(), x.dim())?;
        let x = x.as_line();
        self.row_iter().map(|row| row.dot(&x)).collect()
    }

    /// Matrix-matrix multiply: C = A * B.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if `self.cols() != other.rows()`.
    pub fn mm(&self, other: &Self) -> Result<Self> {
        check_dim(self.cols(), other.rows())?;
        let mut data = Vec::with_capacity(self.rows() * other.cols());
        for row in self.row_iter() {
            for col in other.col_iter() {
                data.push(row.dot(&col)?);
            }
        }
        Ok(Self::from_parts(self.rows(), other.cols(), data))
    }

    /// Scales all entries by a scalar.
    #[must_use]
    pub fn scale(&self, scalar: &E) -> Self {
        let data = self
            .as_slice()
            .iter()
            .map(|v| v.clone() * scalar.clone())
            .collect();
        Self::from_parts(self.rows(), self.cols(), data)
    }

    /// Adds a scaled row to another: row[target] += scale * row[source].
    ///
    /// # Panics
    ///
    /// Panics with `IndexOutOfRange` if either row is out of bounds.
    #[track_caller]
    pub fn add_scaled_row(&mut self, target: usize, source: usize, scale: &E) {
        let rows = self.rows();
        if let Err(err) = check_index(target, rows).and(check_index(source, rows)) {
            raise(err);
        }
        let cols = self.cols();
        let data = self.as_mut_slice();
        for k in 0..cols {
            let val = data[source * cols + k].clone() * scale.clone();
            let t = &mut data[target * cols + k];
            *t = t.clone() + val;
        }
    }

    /// Scales a row by a scalar.
    ///
    /// # Panics
    ///
    /// Panics with `IndexOutOfRange` if the row is out of bounds.
    #[track_caller]
    pub fn scale_row(&mut self, row: usize, scale: &E) {
        let mut line = self.row_mut(row);
        line *= scale;
    }
}

impl<E: Clone + Add<Output = E>> Matrix<E> {
    /// Element-wise sum.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the shapes differ.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, |a, b| a.clone() + b.clone())
    }
}

impl<E: Clone + Sub<Output = E>> Matrix<E> {
    /// Element-wise difference.
    ///
    /// # Errors
    ///
    /// [`MatrixError::DimensionMismatch`] if the shapes differ.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.zip_map(other, |a, b| a.clone() - b.clone())
    }
}

impl<E> Matrix<E> {
    fn zip_map(&self, other: &Self, f: impl Fn(&E, &E) -> E) -> Result<Self> {
        check_dim(self.rows(), other.rows())?;
        check_dim(self.cols(), other.cols())?;
        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| f(a, b))
            .collect();
        Ok(Self::from_parts(self.rows(), self.cols(), data))
    }
}

impl<E> Default for Matrix<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Matrix<E> {
    /// Shares the storage; see [`Matrix::share`].
    fn clone(&self) -> Self {
        self.share()
    }
}

impl<E: PartialEq> PartialEq for Matrix<E> {
    fn eq(&self, other: &Self) -> bool {
        self.dim() == other.dim() && self.as_slice() == other.as_slice()
    }
}

impl<E: Eq> Eq for Matrix<E> {}

impl<E: fmt::Debug> fmt::Debug for Matrix<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .field("data", &self.as_slice())
            .finish()
    }
}

/// One row per line, entries separated by single spaces.
impl<E: fmt::Display> fmt::Display for Matrix<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_iter() {
            for (k, x) in row.iter().enumerate() {
                if k > 0 {
                    f.write_str(" ")?;
                }
                fmt::Display::fmt(x, f)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols)
        .ok_or(MatrixError::Buffer(BufferError::OutOfMemory {
            requested: usize::MAX,
        }))
}

impl<E> Index<(usize, usize)> for Matrix<E> {
    type Output = E;

    #[track_caller]
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        #[cfg(any(feature = "bounds-check", debug_assertions))]
        if let Err(err) = self.check(i, j) {
            raise(err);
        }
        &self.as_slice()[i * self.cols() + j]
    }
}

impl<E: Clone> IndexMut<(usize, usize)> for Matrix<E> {
    #[track_caller]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        #[cfg(any(feature = "bounds-check", debug_assertions))]
        if let Err(err) = self.check(i, j) {
            raise(err);
        }
        let cols = self.cols();
        &mut self.as_mut_slice()[i * cols + j]
    }
}

impl<E2: Clone, E: From<E2>> From<&Matrix<E2>> for Matrix<E> {
    fn from(other: &Matrix<E2>) -> Self {
        Self::convert_from(other)
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the shapes differ.
impl<E: Clone + Add<Output = E>> Add for &Matrix<E> {
    type Output = Matrix<E>;

    #[track_caller]
    fn add(self, other: Self) -> Matrix<E> {
        self.try_add(other).unwrap_or_else(|err| raise(err))
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the shapes differ.
impl<E: Clone + Sub<Output = E>> Sub for &Matrix<E> {
    type Output = Matrix<E>;

    #[track_caller]
    fn sub(self, other: Self) -> Matrix<E> {
        self.try_sub(other).unwrap_or_else(|err| raise(err))
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the inner dimensions differ.
impl<E: Clone + Zero + Mul<Output = E>> Mul for &Matrix<E> {
    type Output = Matrix<E>;

    #[track_caller]
    fn mul(self, other: Self) -> Matrix<E> {
        self.mm(other).unwrap_or_else(|err| raise(err))
    }
}

/// # Panics
///
/// Panics with `DimensionMismatch` if the vector length differs from the
/// column count.
impl<E: Clone + Zero + Mul<Output = E>> Mul<&Vector<E>> for &Matrix<E> {
    type Output = Vector<E>;

    #[track_caller]
    fn mul(self, x: &Vector<E>) -> Vector<E> {
        self.mv(x).unwrap_or_else(|err| raise(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::All;

    fn m(rows: Vec<Vec<i64>>) -> Matrix<i64> {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_zeros() {
        let z: Matrix<i64> = Matrix::zeros(3, 4);
        assert_eq!(z.rows(), 3);
        assert_eq!(z.cols(), 4);
        assert!(z.as_slice().iter().all(|&x| x == 0));
    }

    #[test]
    fn test_try_zeros_overflow() {
        let err = Matrix::<i64>::try_zeros(usize::MAX, 2).unwrap_err();
        assert_eq!(
            err,
            MatrixError::Buffer(BufferError::OutOfMemory {
                requested: usize::MAX
            })
        );
        assert_eq!(Matrix::<i64>::try_zeros(0, usize::MAX).unwrap().dim().cols, usize::MAX);
    }

    #[test]
    fn test_identity() {
        let id: Matrix<i64> = Matrix::identity(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(id[(i, j)], i64::from(i == j));
            }
        }
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert_eq!(err, MatrixError::DimensionMismatch { expected: 2, found: 1 });
        assert!(Matrix::from_vec(2, 2, vec![1, 2, 3]).is_err());
        assert_eq!(Matrix::<i64>::from_rows(Vec::new()).unwrap().dim(), Dim::default());
    }

    #[test]
    fn test_get_out_of_range() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(a.get(1, 1), Ok(&4));
        assert_eq!(
            a.get(2, 0),
            Err(MatrixError::IndexOutOfRange { index: 2, extent: 2 })
        );
        assert!(a.get(0, 2).is_err());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_panics_out_of_range() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let _ = a[(0, 2)];
    }

    #[test]
    fn test_mv() {
        let a = m(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let x = Vector::from_vec(vec![1, 2, 3]);
        // [1*1 + 2*2 + 3*3, 4*1 + 5*2 + 6*3] = [14, 32]
        assert_eq!(a.mv(&x).unwrap(), Vector::from_vec(vec![14, 32]));
        assert!(a.mv(&Vector::from_vec(vec![1])).is_err());
    }

    #[test]
    fn test_mm() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![5, 6], vec![7, 8]]);
        // [[1*5+2*7, 1*6+2*8], [3*5+4*7, 3*6+4*8]] = [[19, 22], [43, 50]]
        assert_eq!(&a * &b, m(vec![vec![19, 22], vec![43, 50]]));
        assert!(a.mm(&m(vec![vec![1, 2, 3]])).is_err());
    }

    #[test]
    fn test_transpose() {
        let a = m(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let t = a.transpose();
        assert_eq!(t.dim(), Dim { rows: 3, cols: 2 });
        assert_eq!(t[(1, 0)], 2);
        assert_eq!(t[(2, 1)], 6);
    }

    #[test]
    fn test_row_ops() {
        let mut a = m(vec![vec![1, 2], vec![3, 4]]);
        a.swap_rows(0, 1);
        assert_eq!(a, m(vec![vec![3, 4], vec![1, 2]]));
        a.add_scaled_row(0, 1, &-3);
        assert_eq!(a, m(vec![vec![0, -2], vec![1, 2]]));
        a.scale_row(1, &5);
        assert_eq!(a, m(vec![vec![0, -2], vec![5, 10]]));
    }

    #[test]
    fn test_add_sub_scale() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![1, 1], vec![1, 1]]);
        assert_eq!(&a + &b, m(vec![vec![2, 3], vec![4, 5]]));
        assert_eq!(&a - &b, m(vec![vec![0, 1], vec![2, 3]]));
        assert_eq!(a.scale(&2), m(vec![vec![2, 4], vec![6, 8]]));
        assert!(a.try_add(&m(vec![vec![1, 2]])).is_err());
    }

    #[test]
    fn test_rows_and_cols_views() {
        let a = m(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(a.row(1), *[4, 5, 6].as_slice());
        assert_eq!(a.col(2), *[3, 6].as_slice());
        assert_eq!(a.col_iter().count(), 3);
        let sums: Vec<i64> = a.row_iter().map(|r| r.iter().sum()).collect();
        assert_eq!(sums, vec![6, 15]);
        assert_eq!(a.row(0).to_vector(), Vector::from_vec(vec![1, 2, 3]));
    }

    #[test]
    fn test_row_and_col_proxies() {
        let mut a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![10, 20], vec![30, 40]]);

        let mut row = a.row_mut(0);
        row += b.row(1);
        assert_eq!(a, m(vec![vec![31, 42], vec![3, 4]]));

        let mut col = a.col_mut(1);
        col *= &2;
        assert_eq!(a, m(vec![vec![31, 84], vec![3, 8]]));

        let mut c = a.col_mut(0);
        c -= b.col(0);
        assert_eq!(a, m(vec![vec![21, 84], vec![-27, 8]]));
    }

    #[test]
    fn test_minor_read() {
        let a = m(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        let minor = a.minor([0, 2], 1..3).unwrap();
        assert_eq!((minor.rows(), minor.cols()), (2, 2));
        assert_eq!(minor[(1, 0)], 8);
        assert_eq!(minor.to_matrix(), m(vec![vec![2, 3], vec![8, 9]]));
        assert!(a.minor(All, 2..4).is_err());
    }

    #[test]
    fn test_minor_write_goes_into_owner() {
        let mut a = m(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        let before = a.share();
        {
            let mut minor = a.minor_mut(All, [0, 2]).unwrap();
            minor.fill(&0);
            minor[(1, 1)] = 7;
            *minor.get_mut(0, 0).unwrap() = -1;
        }
        assert_eq!(a, m(vec![vec![-1, 2, 0], vec![0, 5, 7]]));
        assert_eq!(before, m(vec![vec![1, 2, 3], vec![4, 5, 6]]));
        assert_eq!(a.ownership(), Ownership::Owned);
    }

    #[test]
    fn test_minor_assign() {
        let mut a: Matrix<i64> = Matrix::zeros(3, 3);
        let block = m(vec![vec![1, 2], vec![3, 4]]);
        a.minor_mut(1.., 1..).unwrap().assign(&block).unwrap();
        assert_eq!(a, m(vec![vec![0, 0, 0], vec![0, 1, 2], vec![0, 3, 4]]));

        let err = a.minor_mut(..1, All).unwrap().assign(&block).unwrap_err();
        assert_eq!(err, MatrixError::DimensionMismatch { expected: 1, found: 2 });
    }

    #[test]
    fn test_append_rows() {
        let mut a = Matrix::new();
        a.append_row(&[1, 2]).unwrap();
        a.append_rows(&m(vec![vec![3, 4], vec![5, 6]])).unwrap();
        assert_eq!(a, m(vec![vec![1, 2], vec![3, 4], vec![5, 6]]));
        assert!(a.append_row(&[1]).is_err());
    }

    #[test]
    fn test_append_cols_interleaves() {
        let mut a = m(vec![vec![1, 2], vec![3, 4]]);
        a.append_col(&[9, 8]).unwrap();
        assert_eq!(a, m(vec![vec![1, 2, 9], vec![3, 4, 8]]));
        assert_eq!(a.as_slice(), &[1, 2, 9, 3, 4, 8]);

        a.append_cols(&m(vec![vec![0], vec![-1]])).unwrap();
        assert_eq!(a.row(1), *[3, 4, 8, -1].as_slice());

        let mut empty = Matrix::new();
        empty.append_col(&[1, 2, 3]).unwrap();
        assert_eq!(empty.dim(), Dim { rows: 3, cols: 1 });
        assert!(empty.append_col(&[1]).is_err());
    }

    #[test]
    fn test_resize_same_cols_reuses_prefix() {
        let mut a = m(vec![vec![1, 2], vec![3, 4]]);
        a.resize(3, 2);
        assert_eq!(a, m(vec![vec![1, 2], vec![3, 4], vec![0, 0]]));
        a.resize_rows(1);
        assert_eq!(a, m(vec![vec![1, 2]]));
    }

    #[test]
    fn test_resize_changed_cols_keeps_top_left() {
        let mut a = m(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        a.resize(3, 2);
        assert_eq!(a, m(vec![vec![1, 2], vec![4, 5], vec![0, 0]]));
        a.resize_cols(4);
        assert_eq!(a, m(vec![vec![1, 2, 0, 0], vec![4, 5, 0, 0], vec![0, 0, 0, 0]]));
    }

    #[test]
    fn test_resize_shared_leaves_other_alone() {
        let mut a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = a.share();
        a.resize(1, 2);
        assert_eq!(b, m(vec![vec![1, 2], vec![3, 4]]));
        assert_eq!(a.dim(), Dim { rows: 1, cols: 2 });
    }

    #[test]
    fn test_swap_and_clear() {
        let mut a = m(vec![vec![1]]);
        let mut b = m(vec![vec![2, 3]]);
        a.swap(&mut b);
        assert_eq!(a.cols(), 2);
        assert_eq!(b[(0, 0)], 1);
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.dim(), Dim::default());
    }

    #[test]
    fn test_concat_rows() {
        let mut a = m(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(a.concat_rows().iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        let mut flat = a.concat_rows_mut();
        flat *= &10;
        assert_eq!(a.as_slice(), &[10, 20, 30, 40]);
    }

    #[test]
    fn test_display() {
        let a = m(vec![vec![1, -2], vec![3, 4]]);
        assert_eq!(a.to_string(), "1 -2\n3 4\n");
    }
}
