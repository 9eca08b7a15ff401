//! Minimal reverse-mode autograd engine over `ndarray` values.
//!
//! Tensors are cheap handles to shared graph nodes. Operations executed while gradient
//! mode is enabled record a graph, and [`Tensor::backward`] walks it in reverse
//! topological order, accumulating gradients into every node that requires them.

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod tensor;
pub mod tensor_data;
pub mod utils;

pub use error::{ErrorKind, FerrogradError};
pub use ops::view::SplitSize;
pub use tensor::Tensor;

// Re-exported so callers can build values and seeds without depending on ndarray directly.
pub use ndarray;
