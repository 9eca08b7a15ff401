// src/tensor_data.rs
use std::fmt::Debug;
use std::sync::Arc;

use ndarray::{ArrayD, IxDyn};

use crate::autograd::BackwardOp;
use crate::error::FerrogradError;

/// Internal storage and autograd metadata for a Tensor: one node of the
/// computation graph.
///
/// It is wrapped in `Arc<RwLock<TensorData>>` by the `Tensor` struct to allow
/// shared ownership and interior mutability of the gradient slot. The value
/// itself is never mutated after construction.
#[derive(Debug)]
pub struct TensorData {
    /// The value produced for this node.
    pub(crate) value: ArrayD<f32>,

    /// Flag indicating if the tensor requires gradient computation.
    /// If true, operations involving this tensor will be tracked in the computation graph.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient, same shape as `value`.
    /// Absent until the first accumulation; summed into on every later one.
    pub(crate) grad: Option<ArrayD<f32>>,
    /// The operation that produced this node. Leaf tensors have `grad_fn = None`.
    ///
    /// Ownership only runs from outputs to their operation and from the
    /// operation to its inputs, so the graph never contains an `Arc` cycle.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates a new leaf `TensorData` from flat row-major data and a shape.
    ///
    /// # Errors
    /// Returns `FerrogradError::TensorCreationError` if the length of `data_vec` does not match
    /// the total number of elements specified by `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, FerrogradError> {
        let numel: usize = shape.iter().product();
        let data_len = data_vec.len();
        if data_len != numel {
            return Err(FerrogradError::TensorCreationError { data_len, shape });
        }
        let value = ArrayD::from_shape_vec(IxDyn(&shape), data_vec)
            .map_err(|_| FerrogradError::TensorCreationError { data_len, shape })?;
        Ok(Self::from_array(value))
    }

    /// Wraps an existing array as a leaf node.
    pub fn from_array(value: ArrayD<f32>) -> Self {
        TensorData {
            value,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn numel(&self) -> usize {
        self.value.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.grad_fn.is_none()
    }

    /// Sums `incoming` into the gradient slot, materializing it on first use.
    ///
    /// Nodes that do not require grad never accept a gradient.
    pub(crate) fn accumulate_grad(&mut self, incoming: ArrayD<f32>) -> Result<(), FerrogradError> {
        if !self.requires_grad {
            return Ok(());
        }
        if incoming.shape() != self.value.shape() {
            return Err(FerrogradError::ShapeMismatch {
                expected: self.value.shape().to_vec(),
                actual: incoming.shape().to_vec(),
                operation: "accumulate_grad".to_string(),
            });
        }
        match self.grad.as_mut() {
            Some(existing) => *existing += &incoming,
            None => self.grad = Some(incoming),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = TensorData::new(vec![1.0, 2.0, 3.0], vec![2, 2]).unwrap_err();
        assert_eq!(
            err,
            FerrogradError::TensorCreationError {
                data_len: 3,
                shape: vec![2, 2]
            }
        );
    }

    #[test]
    fn test_accumulate_sums_instead_of_overwriting() {
        let mut node = TensorData::new(vec![0.0; 3], vec![3]).unwrap();
        node.requires_grad = true;
        node.accumulate_grad(ArrayD::from_elem(IxDyn(&[3]), 1.0)).unwrap();
        node.accumulate_grad(ArrayD::from_elem(IxDyn(&[3]), 2.5)).unwrap();
        let grad = node.grad.as_ref().unwrap();
        assert_eq!(grad.iter().copied().collect::<Vec<_>>(), vec![3.5, 3.5, 3.5]);
    }

    #[test]
    fn test_accumulate_ignored_without_requires_grad() {
        let mut node = TensorData::new(vec![0.0; 2], vec![2]).unwrap();
        node.accumulate_grad(ArrayD::from_elem(IxDyn(&[2]), 1.0)).unwrap();
        assert!(node.grad.is_none());
    }

    #[test]
    fn test_accumulate_shape_mismatch() {
        let mut node = TensorData::new(vec![0.0; 2], vec![2]).unwrap();
        node.requires_grad = true;
        let res = node.accumulate_grad(ArrayD::from_elem(IxDyn(&[3]), 1.0));
        assert!(matches!(res, Err(FerrogradError::ShapeMismatch { .. })));
    }
}
