use crate::{
    errors::{IndexError, ShapeError},
    iterator::{Indexable, Iter},
    matrix::Matrix,
    numeric::Numeric,
    shape::{self, TensorShape},
};
use std::ops::{Add, Index, IndexMut, Mul, MulAssign};

pub const RANK: usize = 3;

/// A dense `depth x rows x cols` tensor: `depth` slices, each a `rows x cols`
/// grid. Storage is depth-major, row-major within each slice, which is also
/// the order `reshape` preserves.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<T> {
    depth: usize,
    rows: usize,
    cols: usize,
    storage: Vec<T>,
}

impl<T> Tensor<T> {
    fn from_storage(depth: usize, rows: usize, cols: usize, storage: Vec<T>) -> Self {
        debug_assert_eq!(Some(storage.len()), shape::checked_num_elems([depth, rows, cols]));
        Self {
            depth,
            rows,
            cols,
            storage,
        }
    }

    pub fn from_vec(
        depth: usize,
        rows: usize,
        cols: usize,
        vals: Vec<T>,
    ) -> Result<Self, ShapeError> {
        let expected = shape::checked_num_elems([depth, rows, cols]).ok_or_else(|| {
            ShapeError::ElementCountOverflow {
                shape: vec![depth, rows, cols],
            }
        })?;
        if vals.len() != expected {
            return Err(ShapeError::LengthMismatch {
                shape: vec![depth, rows, cols],
                expected,
                found: vals.len(),
            });
        }

        Ok(Self::from_storage(depth, rows, cols, vals))
    }

    pub fn shape(&self) -> TensorShape {
        [self.depth, self.rows, self.cols]
    }

    pub fn depth(&self) -> usize {
        self.depth
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

    /// Every element in depth-major, row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.storage
    }

    pub fn into_vec(self) -> Vec<T> {
        self.storage
    }

    pub fn get_mut(&mut self, k: usize, i: usize, j: usize) -> Result<&mut T, IndexError> {
        let idx = shape::storage_idx([k, i, j], self.shape())?;
        Ok(&mut self.storage[idx])
    }

    pub fn iter(&self) -> Iter<'_, Self> {
        Iter::new(self)
    }

    /// Reinterprets the elements under a new shape with the same total
    /// count. The flattened order of elements is unchanged; on error the
    /// tensor is left as it was.
    pub fn reshape(&mut self, depth: usize, rows: usize, cols: usize) -> Result<(), ShapeError> {
        let to = [depth, rows, cols];
        if shape::checked_num_elems(to) != Some(self.storage.len()) {
            log::trace!("reshape rejected: {:?} -> {:?}", self.shape(), to);
            return Err(ShapeError::ReshapeMismatch {
                from: self.shape(),
                to,
            });
        }

        log::debug!("reshaping {:?} -> {:?}", self.shape(), to);
        self.depth = depth;
        self.rows = rows;
        self.cols = cols;

        Ok(())
    }

    fn slice_range(&self, k: usize) -> std::ops::Range<usize> {
        let n = self.rows * self.cols;
        k * n..(k + 1) * n
    }
}

impl<T: Numeric> Tensor<T> {
    pub fn repeat(depth: usize, rows: usize, cols: usize, val: T) -> Self {
        Self::from_storage(depth, rows, cols, vec![val; depth * rows * cols])
    }

    pub fn zeros(depth: usize, rows: usize, cols: usize) -> Self {
        Self::repeat(depth, rows, cols, T::zero())
    }

    pub fn ones(depth: usize, rows: usize, cols: usize) -> Self {
        Self::repeat(depth, rows, cols, T::one())
    }

    pub fn from_fn(
        depth: usize,
        rows: usize,
        cols: usize,
        mut f: impl FnMut(&[usize; RANK]) -> T,
    ) -> Self {
        let mut storage = Vec::with_capacity(depth * rows * cols);
        for k in 0..depth {
            for i in 0..rows {
                for j in 0..cols {
                    storage.push(f(&[k, i, j]));
                }
            }
        }

        Self::from_storage(depth, rows, cols, storage)
    }

    /// Builds a tensor from triple-nested sequences. The outer length is the
    /// depth, the first slice fixes the row count and its first row fixes
    /// the column count. Every slice and every row is checked against those
    /// extents before anything is copied.
    pub fn from_nested<S, R>(slices: &[S]) -> Result<Self, ShapeError>
    where
        S: AsRef<[R]>,
        R: AsRef<[T]>,
    {
        let rows = slices.first().map_or(0, |s| s.as_ref().len());
        let cols = slices
            .first()
            .and_then(|s| s.as_ref().first())
            .map_or(0, |r| r.as_ref().len());

        for (k, slice) in slices.iter().enumerate() {
            let slice = slice.as_ref();
            if slice.len() != rows {
                log::trace!("slice {} has {} rows, expected {}", k, slice.len(), rows);
                return Err(ShapeError::RaggedSlices {
                    slice: k,
                    expected: [rows, cols],
                    found: [slice.len(), slice.first().map_or(0, |r| r.as_ref().len())],
                });
            }
            for (i, row) in slice.iter().enumerate() {
                let found = row.as_ref().len();
                if found != cols {
                    log::trace!("slice {} row {} has {} elements, expected {}", k, i, found, cols);
                    return Err(ShapeError::RaggedSliceRows {
                        slice: k,
                        row: i,
                        expected: cols,
                        found,
                    });
                }
            }
        }

        let mut storage = Vec::with_capacity(slices.len() * rows * cols);
        for slice in slices {
            for row in slice.as_ref() {
                storage.extend_from_slice(row.as_ref());
            }
        }

        Ok(Self::from_storage(slices.len(), rows, cols, storage))
    }

    /// Stacks equally shaped matrices along the depth axis.
    pub fn from_slices(slices: &[Matrix<T>]) -> Result<Self, ShapeError> {
        let [rows, cols] = slices.first().map_or([0, 0], |m| m.shape());
        for (k, m) in slices.iter().enumerate() {
            if m.shape() != [rows, cols] {
                return Err(ShapeError::RaggedSlices {
                    slice: k,
                    expected: [rows, cols],
                    found: m.shape(),
                });
            }
        }

        let mut storage = Vec::with_capacity(slices.len() * rows * cols);
        for m in slices {
            storage.extend_from_slice(m.as_slice());
        }

        Ok(Self::from_storage(slices.len(), rows, cols, storage))
    }

    pub fn get(&self, k: usize, i: usize, j: usize) -> Result<T, IndexError> {
        let idx = shape::storage_idx([k, i, j], self.shape())?;
        Ok(self.storage[idx])
    }

    pub fn set(&mut self, k: usize, i: usize, j: usize, val: T) -> Result<(), IndexError> {
        *self.get_mut(k, i, j)? = val;
        Ok(())
    }

    /// Copies depth layer `k` into a new matrix. Later changes to either
    /// side are not visible to the other.
    pub fn slice(&self, k: usize) -> Result<Matrix<T>, IndexError> {
        if k >= self.depth {
            log::trace!("slice {} rejected for depth {}", k, self.depth);
            return Err(IndexError::SliceOutOfBounds {
                k,
                depth: self.depth,
            });
        }

        Ok(self.slice_unchecked(k))
    }

    pub fn slices(&self) -> Vec<Matrix<T>> {
        (0..self.depth).map(|k| self.slice_unchecked(k)).collect()
    }

    fn slice_unchecked(&self, k: usize) -> Matrix<T> {
        let vals = self.storage[self.slice_range(k)].to_vec();
        Matrix::from_storage(self.rows, self.cols, vals)
    }

    /// Depth-major, row-major copy of every element.
    pub fn flatten(&self) -> Vec<T> {
        self.storage.clone()
    }

    pub fn map(self, f: impl Fn(&[usize; RANK], T) -> T) -> Self {
        let [depth, rows, cols] = self.shape();
        let stride = shape::stride(self.shape());
        Self::from_fn(depth, rows, cols, |idx| {
            let i = idx[0] * stride[0] + idx[1] * stride[1] + idx[2];
            f(idx, self.storage[i])
        })
    }

    /// Elementwise sum. All three extents must match.
    pub fn add(&self, other: &Self) -> Result<Self, ShapeError> {
        if self.shape() != other.shape() {
            log::trace!("add rejected: {:?} vs {:?}", self.shape(), other.shape());
            return Err(ShapeError::AddMismatch {
                lhs: self.shape().to_vec(),
                rhs: other.shape().to_vec(),
            });
        }

        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Elementwise (Hadamard) product. All three extents must match.
    pub fn elementwise_mul(&self, other: &Self) -> Result<Self, ShapeError> {
        if self.shape() != other.shape() {
            log::trace!(
                "elementwise multiply rejected: {:?} vs {:?}",
                self.shape(),
                other.shape()
            );
            return Err(ShapeError::ElementwiseMismatch {
                lhs: self.shape().to_vec(),
                rhs: other.shape().to_vec(),
            });
        }

        Ok(self.zip_with(other, |a, b| a * b))
    }

    fn zip_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        let storage = self
            .storage
            .iter()
            .zip(other.storage.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();

        Self::from_storage(self.depth, self.rows, self.cols, storage)
    }

    /// Multiplies every depth slice by `m`. `self.num_cols()` must equal
    /// `m.num_rows()`; the result is `depth x rows x m.num_cols()`.
    pub fn matmul(&self, m: &Matrix<T>) -> Result<Self, ShapeError> {
        if self.cols != m.num_rows() {
            log::trace!("tensor matmul rejected: {:?} x {:?}", self.shape(), m.shape());
            return Err(ShapeError::MatmulMismatch {
                lhs: self.shape().to_vec(),
                rhs: m.shape().to_vec(),
            });
        }

        log::debug!(
            "projecting {} slices of {}x{} through {}x{}",
            self.depth,
            self.rows,
            self.cols,
            m.num_rows(),
            m.num_cols()
        );
        let mut storage = Vec::with_capacity(self.depth * self.rows * m.num_cols());
        for k in 0..self.depth {
            let out = self.slice_unchecked(k).matmul(m)?;
            storage.extend(out.into_vec());
        }

        Ok(Self::from_storage(self.depth, self.rows, m.num_cols(), storage))
    }
}

impl<T: Numeric> Default for Tensor<T> {
    fn default() -> Self {
        Self::zeros(0, 0, 0)
    }
}

impl<T: Copy, const D: usize, const R: usize, const C: usize> From<[[[T; C]; R]; D]>
    for Tensor<T>
{
    fn from(vals: [[[T; C]; R]; D]) -> Self {
        let storage = vals
            .iter()
            .flat_map(|slice| slice.iter().flat_map(|row| row.iter().copied()))
            .collect();
        Self::from_storage(D, R, C, storage)
    }
}

impl<T: Numeric> TryFrom<Vec<Vec<Vec<T>>>> for Tensor<T> {
    type Error = ShapeError;

    fn try_from(slices: Vec<Vec<Vec<T>>>) -> Result<Self, Self::Error> {
        Self::from_nested(slices.as_slice())
    }
}

impl<T> Indexable for Tensor<T> {
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

impl<T> Index<[usize; RANK]> for Tensor<T> {
    type Output = T;

    fn index(&self, idx: [usize; RANK]) -> &Self::Output {
        match shape::storage_idx(idx, self.shape()) {
            Ok(i) => &self.storage[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl<T> IndexMut<[usize; RANK]> for Tensor<T> {
    fn index_mut(&mut self, idx: [usize; RANK]) -> &mut Self::Output {
        match shape::storage_idx(idx, self.shape()) {
            Ok(i) => &mut self.storage[i],
            Err(e) => panic!("{}", e),
        }
    }
}

impl<'a, T: Numeric> Add<&'a Tensor<T>> for &'a Tensor<T> {
    type Output = Result<Tensor<T>, ShapeError>;

    fn add(self, other: &'a Tensor<T>) -> Self::Output {
        Tensor::add(self, other)
    }
}

impl<'a, T: Numeric> Mul<&'a Matrix<T>> for &'a Tensor<T> {
    type Output = Result<Tensor<T>, ShapeError>;

    fn mul(self, m: &'a Matrix<T>) -> Self::Output {
        self.matmul(m)
    }
}

impl<T: Numeric> MulAssign<T> for Tensor<T> {
    fn mul_assign(&mut self, other: T) {
        for v in self.storage.iter_mut() {
            *v = *v * other;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t3() -> Tensor<f64> {
        Tensor::from([[[1.0, 2.0], [3.0, 4.0]], [[5.0, 6.0], [7.0, 8.0]]])
    }

    #[test]
    fn test_basics() {
        let mut t: Tensor<i32> = Tensor::zeros(2, 3, 4);
        assert_eq!(t.shape(), [2, 3, 4]);
        assert_eq!(t.len(), 24);

        t.set(1, 1, 1, 7).unwrap();
        assert_eq!(t[[1, 1, 1]], 7);
        assert_eq!(t[[1, 1, 2]], 0);

        t[[0, 2, 3]] = 5;
        assert_eq!(t.get(0, 2, 3), Ok(5));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut t: Tensor<i32> = Tensor::ones(2, 2, 2);
        assert_eq!(
            t.get(0, 2, 0),
            Err(IndexError::OutOfBounds {
                idx: vec![0, 2, 0],
                shape: vec![2, 2, 2],
            })
        );
        assert!(t.set(2, 0, 0, 3).is_err());
        assert!(t.get_mut(0, 0, 9).is_err());
        assert_eq!(t, Tensor::ones(2, 2, 2));
    }

    #[test]
    fn test_from_nested() {
        let t = Tensor::from_nested(&[
            vec![vec![1, 2, 3], vec![4, 5, 6]],
            vec![vec![7, 8, 9], vec![10, 11, 12]],
        ])
        .unwrap();
        assert_eq!(t.shape(), [2, 2, 3]);
        assert_eq!(t[[1, 0, 2]], 9);

        let empty: Tensor<i32> = Tensor::from_nested::<Vec<Vec<i32>>, Vec<i32>>(&[]).unwrap();
        assert_eq!(empty.shape(), [0, 0, 0]);
    }

    #[test]
    fn test_from_nested_ragged() {
        assert_eq!(
            Tensor::from_nested(&[vec![vec![1, 2], vec![3, 4]], vec![vec![5, 6]]]),
            Err(ShapeError::RaggedSlices {
                slice: 1,
                expected: [2, 2],
                found: [1, 2],
            })
        );
        assert_eq!(
            Tensor::from_nested(&[vec![vec![1, 2], vec![3, 4]], vec![vec![5, 6], vec![7]]]),
            Err(ShapeError::RaggedSliceRows {
                slice: 1,
                row: 1,
                expected: 2,
                found: 1,
            })
        );
        assert!(Tensor::try_from(vec![vec![vec![1.0, 2.0], vec![3.0]]]).is_err());
    }

    #[test]
    fn test_from_slices() {
        let t = t3();
        assert_eq!(Tensor::from_slices(&t.slices()), Ok(t));

        let ragged = [Matrix::<i32>::zeros(2, 2), Matrix::zeros(2, 3)];
        assert_eq!(
            Tensor::from_slices(&ragged),
            Err(ShapeError::RaggedSlices {
                slice: 1,
                expected: [2, 2],
                found: [2, 3],
            })
        );
    }

    #[test]
    fn test_slice() {
        let t = t3();
        assert_eq!(t.slice(0), Ok(Matrix::from([[1.0, 2.0], [3.0, 4.0]])));
        assert_eq!(t.slice(1).unwrap()[[1, 1]], 8.0);
        assert_eq!(
            t.slice(2),
            Err(IndexError::SliceOutOfBounds { k: 2, depth: 2 })
        );
    }

    #[test]
    fn test_slice_is_a_copy() {
        let t = t3();
        let mut s = t.slice(0).unwrap();
        s.set(0, 0, 100.0).unwrap();

        assert_eq!(t[[0, 0, 0]], 1.0);
        assert_eq!(s[[0, 0]], 100.0);
    }

    #[test]
    fn test_elementwise() {
        let t = t3();
        let sum = t.add(&t).unwrap();
        assert_eq!(sum[[1, 1, 1]], 16.0);
        assert_eq!(&t + &t, Ok(sum));

        let prod = t.elementwise_mul(&t).unwrap();
        assert_eq!(prod[[0, 1, 0]], 9.0);
        assert_eq!(prod.slice(1), Ok(Matrix::from([[25.0, 36.0], [49.0, 64.0]])));
    }

    #[test]
    fn test_elementwise_mismatch() {
        let a: Tensor<i32> = Tensor::zeros(2, 2, 2);
        let b: Tensor<i32> = Tensor::zeros(2, 2, 3);

        assert_eq!(
            a.add(&b),
            Err(ShapeError::AddMismatch {
                lhs: vec![2, 2, 2],
                rhs: vec![2, 2, 3],
            })
        );
        assert_eq!(
            a.elementwise_mul(&b),
            Err(ShapeError::ElementwiseMismatch {
                lhs: vec![2, 2, 2],
                rhs: vec![2, 2, 3],
            })
        );
    }

    #[test]
    fn test_matmul() {
        let t = t3();
        let w = Matrix::from([[1.0], [1.0]]);
        let out = t.matmul(&w).unwrap();

        assert_eq!(out.shape(), [2, 2, 1]);
        assert_eq!(out[[0, 0, 0]], 3.0);
        assert_eq!(out.flatten(), vec![3.0, 7.0, 11.0, 15.0]);
        assert_eq!(&t * &w, Ok(out.clone()));

        for k in 0..t.depth() {
            assert_eq!(
                out.slice(k).unwrap(),
                t.slice(k).unwrap().matmul(&w).unwrap()
            );
        }
    }

    #[test]
    fn test_matmul_mismatch() {
        let t: Tensor<i32> = Tensor::zeros(2, 3, 4);
        let m: Matrix<i32> = Matrix::zeros(3, 2);

        assert_eq!(
            t.matmul(&m),
            Err(ShapeError::MatmulMismatch {
                lhs: vec![2, 3, 4],
                rhs: vec![3, 2],
            })
        );
    }

    #[test]
    fn test_reshape() {
        let mut r: Tensor<i32> = Tensor::zeros(1, 2, 2);
        r.set(0, 0, 0, 1).unwrap();
        r.set(0, 0, 1, 2).unwrap();
        r.set(0, 1, 0, 3).unwrap();
        r.set(0, 1, 1, 4).unwrap();

        r.reshape(2, 1, 2).unwrap();
        assert_eq!(r.shape(), [2, 1, 2]);
        assert_eq!(r[[1, 0, 1]], 4);
        assert_eq!(r[[1, 0, 0]], 3);
        assert_eq!(r.flatten(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_reshape_mismatch() {
        let mut t = t3();
        assert_eq!(
            t.reshape(3, 1, 2),
            Err(ShapeError::ReshapeMismatch {
                from: [2, 2, 2],
                to: [3, 1, 2],
            })
        );
        assert!(t.reshape(usize::MAX, 2, 2).is_err());
        assert_eq!(t, t3());
    }

    #[test]
    fn test_reshape_empty_with_huge_extent() {
        let mut t: Tensor<i32> = Tensor::zeros(0, 2, 2);
        t.reshape(usize::MAX, 2, 0).unwrap();
        assert_eq!(t.shape(), [usize::MAX, 2, 0]);
        assert!(t.is_empty());
    }

    #[test]
    fn test_from_vec_overflow() {
        assert_eq!(
            Tensor::<i32>::from_vec(usize::MAX, 2, 2, vec![]),
            Err(ShapeError::ElementCountOverflow {
                shape: vec![usize::MAX, 2, 2],
            })
        );
        assert_eq!(
            Tensor::from_vec(1, 2, 2, vec![1, 2, 3]),
            Err(ShapeError::LengthMismatch {
                shape: vec![1, 2, 2],
                expected: 4,
                found: 3,
            })
        );
    }

    #[test]
    fn test_map_and_scale() {
        let t = Tensor::from_fn(2, 2, 3, |&[k, i, j]| (k * 100 + i * 10 + j) as i64);
        assert_eq!(t[[1, 1, 2]], 112);

        let mut u = t.map(|&[k, _, _], v| v + k as i64);
        assert_eq!(u[[1, 0, 1]], 102);

        u *= 2;
        assert_eq!(u[[1, 0, 1]], 204);
    }
}
