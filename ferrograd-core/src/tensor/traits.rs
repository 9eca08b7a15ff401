// src/tensor/traits.rs

use crate::tensor::Tensor;
use std::fmt;
use std::sync::Arc;

impl Clone for Tensor {
    /// Shallow clone: the new handle points at the same graph node.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.read() {
            Ok(guard) => {
                write!(
                    f,
                    "Tensor(shape={:?}, requires_grad={}, has_grad={}, grad_fn={})",
                    guard.shape(),
                    guard.requires_grad,
                    guard.grad.is_some(),
                    guard.grad_fn.as_ref().map(|op| op.name()).unwrap_or("None"),
                )?;
                if guard.numel() <= 8 {
                    write!(f, " {:?}", guard.value.iter().collect::<Vec<_>>())?;
                }
                Ok(())
            }
            Err(_) => write!(f, "Tensor(Error: RwLock poisoned)"),
        }
    }
}

impl PartialEq for Tensor {
    /// Two tensors are equal when they are the same node, or when their values have the same
    /// shape and elements. Graph metadata is not compared.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        let self_guard = self.read_data();
        let other_guard = other.read_data();
        self_guard.value == other_guard.value
    }
}
