// src/tensor/mod.rs

use crate::autograd::{self, BackwardOp};
use crate::error::FerrogradError;
use crate::tensor_data::TensorData;
use ndarray::{ArrayD, IxDyn};
use std::sync::{Arc, RwLock};

mod arithmetic_methods;
mod autograd_methods;
mod reduction_methods;
mod traits;
mod view_methods;

pub mod broadcast_utils;
pub mod create;
pub mod utils;

pub use create::{arange, full, ones, ones_like, randn, uniform, zeros, zeros_like};

/// Represents a multi-dimensional array (tensor) participating in the computation graph.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally to allow for:
/// 1.  **Shared Ownership:** cloning a `Tensor` yields another handle to the same graph node;
///     operations keep their inputs alive through such clones.
/// 2.  **Interior Mutability:** the gradient slot and the `requires_grad` flag of a leaf can be
///     updated through a shared reference. The value never changes after construction.
pub struct Tensor {
    /// Arc for shared ownership, RwLock for interior mutability of TensorData.
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new leaf tensor from flat row-major data and a shape.
    ///
    /// # Errors
    /// `TensorCreationError` if `data_vec.len()` does not equal the product of `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        let tensor_data = TensorData::new(data_vec, shape)?;
        Ok(Self::from_tensor_data(tensor_data))
    }

    /// Wraps an existing array as a leaf tensor.
    pub fn from_array(value: ArrayD<f32>) -> Self {
        Self::from_tensor_data(TensorData::from_array(value))
    }

    /// Creates a 0-dimensional (shape `[]`) leaf tensor.
    pub fn scalar(value: f32) -> Self {
        Self::from_array(ArrayD::from_elem(IxDyn(&[]), value))
    }

    fn from_tensor_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Builds the output node of an operation.
    ///
    /// When [`autograd::should_track`] holds for `inputs`, the node requires grad and
    /// `make_grad_fn` is called to attach the backward state. Otherwise the backward state is
    /// never built, so nothing keeps the inputs alive.
    pub(crate) fn from_op<F>(value: ArrayD<f32>, inputs: &[&Tensor], make_grad_fn: F) -> Tensor
    where
        F: FnOnce() -> Arc<dyn BackwardOp>,
    {
        let mut tensor_data = TensorData::from_array(value);
        if autograd::should_track(inputs) {
            tensor_data.requires_grad = true;
            tensor_data.grad_fn = Some(make_grad_fn());
        }
        Self::from_tensor_data(tensor_data)
    }

    /// Returns an owned copy of the tensor's value.
    pub fn value(&self) -> ArrayD<f32> {
        self.read_data().value.clone()
    }

    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape().to_vec()
    }

    /// Returns the number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.read_data().value.ndim()
    }

    /// Returns the number of elements in the tensor.
    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Returns the single value of a scalar or one-element tensor.
    ///
    /// # Errors
    /// `ShapeMismatch` if the tensor holds more or fewer than one element.
    pub fn item(&self) -> Result<f32, FerrogradError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(FerrogradError::ShapeMismatch {
                expected: vec![],
                actual: guard.shape().to_vec(),
                operation: "item".to_string(),
            });
        }
        guard
            .value
            .iter()
            .next()
            .copied()
            .ok_or_else(|| FerrogradError::InternalError("item on empty tensor".to_string()))
    }

    /// Returns the elements in row-major order.
    pub fn to_vec(&self) -> Vec<f32> {
        self.read_data().value.iter().copied().collect()
    }

    /// Identity of the underlying graph node, used for visited-sets during traversal.
    pub fn node_id(&self) -> autograd::graph::NodeId {
        Arc::as_ptr(&self.data) as *const () as usize
    }

    /// Acquires a read lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> std::sync::RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    ///
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> std::sync::RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }
}
