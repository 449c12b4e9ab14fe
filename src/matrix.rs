use crate::{
    errors::{IndexError, ShapeError},
    iterator::{Indexable, Iter},
    numeric::Numeric,
    shape::{self, MatrixShape},
};
use std::ops::{Add, Index, IndexMut, Mul, MulAssign};

pub const RANK: usize = 2;

/// A dense `rows x cols` matrix stored in row-major order.
///
/// Arithmetic never mutates an operand: every operation allocates and returns
/// a new, independently owned matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    storage: Vec<T>,
}

impl<T> Matrix<T> {
    /// Wraps storage whose length is already known to be `rows * cols`.
    pub(crate) fn from_storage(rows: usize, cols: usize, storage: Vec<T>) -> Self {
        debug_assert_eq!(Some(storage.len()), shape::checked_num_elems([rows, cols]));
        Self {
            rows,
            cols,
            storage,
        }
    }

    pub fn from_vec(rows: usize, cols: usize, vals: Vec<T>) -> Result<Self, ShapeError> {
        let expected = shape::checked_num_elems([rows, cols]).ok_or_else(|| {
            ShapeError::ElementCountOverflow {
                shape: vec![rows, cols],
            }
        })?;
        if vals.len() != expected {
            return Err(ShapeError::LengthMismatch {
                shape: vec![rows, cols],
                expected,
                found: vals.len(),
            });
        }

        Ok(Self::from_storage(rows, cols, vals))
    }

    pub fn shape(&self) -> MatrixShape {
        [self.rows, self.cols]
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Row-major view of every element.
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    pub fn into_vec(self) -> Vec<T> {
        self.storage
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Result<&mut T, IndexError> {
        let idx = shape::storage_idx([i, j], self.shape())?;
        Ok(&mut self.storage[idx])
    }

    pub fn row(&self, i: usize) -> Result<&[T], IndexError> {
        if i >= self.rows {
            return Err(IndexError::OutOfBounds {
                idx: vec![i],
                shape: vec![self.rows],
            });
        }

        Ok(&self.storage[i * self.cols..(i + 1) * self.cols])
    }

    pub fn iter(&self) -> Iter<'_, Self> {
        Iter::new(self)
    }
}

impl<T: Numeric> Matrix<T> {
    /// A `rows x cols` matrix with every element set to `val`.
    pub fn repeat(rows: usize, cols: usize, val: T) -> Self {
        Self::from_storage(rows, cols, vec![val; rows * cols])
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::repeat(rows, cols, T::zero())
    }

    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::repeat(rows, cols, T::one())
    }

    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |&[i, j]| if i == j { T::one() } else { T::zero() })
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(&[usize; RANK]) -> T) -> Self {
        let mut storage = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                storage.push(f(&[i, j]));
            }
        }

        Self::from_storage(rows, cols, storage)
    }

    /// Builds a matrix from a sequence of rows. The number of rows is the
    /// outer length and the first row fixes the column count; every other
    /// row must match it. An empty sequence gives a 0x0 matrix.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, ShapeError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        for (i, row) in rows.iter().enumerate() {
            let found = row.as_ref().len();
            if found != cols {
                log::trace!("row {} has {} elements, expected {}", i, found, cols);
                return Err(ShapeError::RaggedRows {
                    row: i,
                    expected: cols,
                    found,
                });
            }
        }

        let mut storage = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            storage.extend_from_slice(row.as_ref());
        }

        Ok(Self::from_storage(rows.len(), cols, storage))
    }

    pub fn get(&self, i: usize, j: usize) -> Result<T, IndexError> {
        let idx = shape::storage_idx([i, j], self.shape())?;
        Ok(self.storage[idx])
    }

    pub fn set(&mut self, i: usize, j: usize, val: T) -> Result<(), IndexError> {
        *self.get_mut(i, j)? = val;
        Ok(())
    }

    pub fn map(self, f: impl Fn(&[usize; RANK], T) -> T) -> Self {
        let [rows, cols] = self.shape();
        Self::from_fn(rows, cols, |idx| f(idx, self.storage[idx[0] * cols + idx[1]]))
    }

    /// Elementwise sum. Both matrices must have the same shape.
    pub fn add(&self, other: &Self) -> Result<Self, ShapeError> {
        if self.shape() != other.shape() {
            log::trace!("add rejected: {:?} vs {:?}", self.shape(), other.shape());
            return Err(ShapeError::AddMismatch {
                lhs: self.shape().to_vec(),
                rhs: other.shape().to_vec(),
            });
        }

        let storage = self
            .storage
            .iter()
            .zip(other.storage.iter())
            .map(|(&a, &b)| a + b)
            .collect();

        Ok(Self::from_storage(self.rows, self.cols, storage))
    }

    /// Matrix product. `self.num_cols()` must equal `other.num_rows()`; the
    /// result is `self.num_rows() x other.num_cols()`.
    pub fn matmul(&self, other: &Self) -> Result<Self, ShapeError> {
        if self.cols != other.rows {
            log::trace!("matmul rejected: {:?} x {:?}", self.shape(), other.shape());
            return Err(ShapeError::MatmulMismatch {
                lhs: self.shape().to_vec(),
                rhs: other.shape().to_vec(),
            });
        }

        let n = self.cols;
        let p = other.cols;
        let mut storage = Vec::with_capacity(self.rows * p);
        for i in 0..self.rows {
            let row = &self.storage[i * n..(i + 1) * n];
            for j in 0..p {
                let mut acc = T::zero();
                for (k, &a) in row.iter().enumerate() {
                    acc = acc + a * other.storage[k * p + j];
                }
                storage.push(acc);
            }
        }

        Ok(Self::from_storage(self.rows, p, storage))
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |&[j, i]| {
            self.storage[i * self.cols + j]
        })
    }
}

impl<T: Numeric> Default for Matrix<T> {
    fn default() -> Self {
        Self::zeros(0, 0)
    }
}

impl<T: Copy, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T> {
    fn from(vals: [[T; C]; R]) -> Self {
        let storage = vals.iter().flat_map(|row| row.iter().copied()).collect();
        Self::from_storage(R, C, storage)
    }
}

impl<T: Numeric> TryFrom<Vec<Vec<T>>> for Matrix<T> {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows.as_slice())
    }
}

impl<T> Indexable for Matrix<T> {
    type T = T;
    type Idx = [usize; RANK];

    fn first_idx(&self) -> Option<Self::Idx> {
        shape::first_idx(self.shape())
    }

    fn next_idx(&self, idx: &Self::Idx) -> Option<Self::Idx> {
        shape::next_idx(*idx, self.shape())
    }

    fn elem(&self, idx: &Self::Idx) -> &T {
        &self[*idx]
    }
}

impl<T> Index<[usize; RANK]> for Matrix<T> {
    type Output = T;

    fn index(&self, idx: [usize; RANK]) -> &Self::Output {
        match shape::storage_idx(idx, self.shape()) {
            Ok(i) => &self.storage[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<[usize; RANK]> for Matrix<T> {
    fn index_mut(&mut self, idx: [usize; RANK]) -> &mut Self::Output {
        match shape::storage_idx(idx, self.shape()) {
            Ok(i) => &mut self.storage[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T: Numeric> Add<&'a Matrix<T>> for &'a Matrix<T> {
    type Output = Result<Matrix<T>, ShapeError>;

    fn add(self, other: &'a Matrix<T>) -> Self::Output {
        Matrix::add(self, other)
    }
}

impl<'a, T: Numeric> Mul<&'a Matrix<T>> for &'a Matrix<T> {
    type Output = Result<Matrix<T>, ShapeError>;

    fn mul(self, other: &'a Matrix<T>) -> Self::Output {
        self.matmul(other)
    }
}

impl<T: Numeric> MulAssign<T> for Matrix<T> {
    fn mul_assign(&mut self, other: T) {
        for v in self.storage.iter_mut() {
            *v = *v * other;
        }
    }
}
