use thiserror::Error;

/// Broad classes of failure reported by the engine.
///
/// Every [`FerrogradError`] variant belongs to exactly one class; callers that
/// only care about "was this a shape problem or an index problem" can match on
/// [`FerrogradError::kind`] instead of on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Incompatible shapes, bad backward seed, invalid partition.
    Shape,
    /// Out-of-range axis or embedding index.
    Index,
    /// Backward requested on something that is not part of a gradient graph.
    GradientMode,
    /// A non-finite value produced from finite inputs.
    Numeric,
    /// Broken engine invariant. Never expected in correct programs.
    Internal,
}

/// Custom error type for the ferrograd engine.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum FerrogradError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?} during operation {operation}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
        operation: String,
    },

    #[error("Invalid partition of axis {axis} (length {length}) in {operation}: {message}")]
    InvalidPartition {
        axis: usize,
        length: usize,
        operation: String,
        message: String,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Backward called on non-scalar tensor of shape {shape:?} without explicit gradient.")]
    BackwardNonScalar { shape: Vec<usize> },

    #[error("Invalid axis {axis} for tensor of rank {rank} in {operation}")]
    InvalidAxis {
        axis: isize,
        rank: usize,
        operation: String,
    },

    #[error("Index {index} out of bounds for size {size} in {operation}")]
    IndexOutOfBounds {
        index: f32,
        size: usize,
        operation: String,
    },

    #[error("Operation requires tensor to require grad, but it doesn't.")]
    RequiresGradNotMet,

    #[error("requires_grad can only be changed on leaf tensors.")]
    RequiresGradOnNonLeaf,

    #[error("Non-finite value produced by {operation} from finite inputs")]
    NonFiniteValue { operation: String },

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl FerrogradError {
    /// Classifies this error into one of the engine's error classes.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FerrogradError::ShapeMismatch { .. }
            | FerrogradError::BroadcastError { .. }
            | FerrogradError::InvalidPartition { .. }
            | FerrogradError::TensorCreationError { .. }
            | FerrogradError::BackwardNonScalar { .. } => ErrorKind::Shape,
            FerrogradError::InvalidAxis { .. } | FerrogradError::IndexOutOfBounds { .. } => {
                ErrorKind::Index
            }
            FerrogradError::RequiresGradNotMet | FerrogradError::RequiresGradOnNonLeaf => {
                ErrorKind::GradientMode
            }
            FerrogradError::NonFiniteValue { .. } => ErrorKind::Numeric,
            FerrogradError::InternalError(_) => ErrorKind::Internal,
        }
    }
}
