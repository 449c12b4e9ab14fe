//! Dense, dynamically shaped numeric containers: a two-dimensional
//! [`Matrix`] and a three-dimensional [`Tensor`] built from matrix-shaped
//! depth slices.
//!
//! Every indexed access is bounds-checked and every arithmetic operation
//! validates its operands' shapes, returning [`IndexError`] or [`ShapeError`]
//! instead of producing a partially built result.

pub mod distribution;
pub mod errors;
pub mod iterator;
pub mod matrix;
pub mod numeric;
pub mod render;
pub mod shape;
pub mod tensor;

pub use errors::{IndexError, ShapeError};
pub use matrix::Matrix;
pub use tensor::Tensor;
