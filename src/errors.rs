use thiserror::Error;

/// Raised when operands (or literal input) have extents incompatible with the
/// operation being performed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("dimensions must match for addition: {lhs:?} vs {rhs:?}")]
    AddMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    #[error("dimensions must match for elementwise multiplication: {lhs:?} vs {rhs:?}")]
    ElementwiseMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    #[error("cannot multiply {lhs:?} by {rhs:?}: inner dimensions differ")]
    MatmulMismatch { lhs: Vec<usize>, rhs: Vec<usize> },

    #[error("all rows must have the same length: row {row} has {found} elements, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("all rows must have the same length: slice {slice} row {row} has {found} elements, expected {expected}")]
    RaggedSliceRows {
        slice: usize,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("all slices must have the same shape: slice {slice} is {found:?}, expected {expected:?}")]
    RaggedSlices {
        slice: usize,
        expected: [usize; 2],
        found: [usize; 2],
    },

    #[error("total size must remain constant: cannot reshape {from:?} into {to:?}")]
    ReshapeMismatch { from: [usize; 3], to: [usize; 3] },

    #[error("shape {shape:?} holds more elements than fit in memory")]
    ElementCountOverflow { shape: Vec<usize> },

    #[error("shape {shape:?} holds {expected} elements but {found} were given")]
    LengthMismatch {
        shape: Vec<usize>,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("index {idx:?} out of bounds for shape {shape:?}")]
    OutOfBounds { idx: Vec<usize>, shape: Vec<usize> },

    #[error("slice index {k} out of bounds for depth {depth}")]
    SliceOutOfBounds { k: usize, depth: usize },
}
