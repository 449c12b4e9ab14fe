use std::fmt::Debug;

/// Element types a [`Matrix`](crate::matrix::Matrix) or
/// [`Tensor`](crate::tensor::Tensor) can hold: anything with `+`, `*` and a
/// zero, which is used as the default fill value.
pub trait Numeric: num::Num + Copy + Debug + 'static {}

impl<T> Numeric for T where T: num::Num + Copy + Debug + 'static {}
