use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::{matrix::Matrix, numeric::Numeric, tensor::Tensor};

impl<T: Numeric> Matrix<T> {
    /// Fills a `rows x cols` matrix with samples from `d`, row by row.
    pub fn rand(rows: usize, cols: usize, d: impl Distribution<T>, rng: &mut impl Rng) -> Self {
        Self::from_fn(rows, cols, |_| d.sample(&mut *rng))
    }

    pub fn randn(rows: usize, cols: usize, rng: &mut impl Rng) -> Self
    where
        StandardNormal: Distribution<T>,
    {
        Self::rand(rows, cols, StandardNormal, rng)
    }
}

impl<T: Numeric> Tensor<T> {
    /// Fills a `depth x rows x cols` tensor with samples from `d` in
    /// depth-major, row-major order.
    pub fn rand(
        depth: usize,
        rows: usize,
        cols: usize,
        d: impl Distribution<T>,
        rng: &mut impl Rng,
    ) -> Self {
        Self::from_fn(depth, rows, cols, |_| d.sample(&mut *rng))
    }

    pub fn randn(depth: usize, rows: usize, cols: usize, rng: &mut impl Rng) -> Self
    where
        StandardNormal: Distribution<T>,
    {
        Self::rand(depth, rows, cols, StandardNormal, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use rand_distr::Uniform;

    #[test]
    fn test_rand_within_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::rand(3, 4, Uniform::new(50.0, 150.0), &mut rng);

        assert_eq!(m.shape(), [3, 4]);
        assert!(m.iter().values().all(|&v| (50.0..150.0).contains(&v)));
    }

    #[test]
    fn test_same_seed_same_values() {
        let a: Tensor<f64> = Tensor::randn(2, 3, 4, &mut StdRng::seed_from_u64(42));
        let b: Tensor<f64> = Tensor::randn(2, 3, 4, &mut StdRng::seed_from_u64(42));

        assert_eq!(a, b);
    }

    #[test]
    fn test_integer_samples() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = Tensor::rand(2, 2, 2, Uniform::new_inclusive(1, 10), &mut rng);

        assert_eq!(t.len(), 8);
        assert!(t.iter().values().all(|&v: &i32| (1..=10).contains(&v)));
    }
}
