use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::ArrayD;
use std::sync::Arc;

use super::broadcast_binary;

/// Backward context for elementwise addition.
///
/// d(a + b)/da = d(a + b)/db = 1, so both inputs receive `grad_output` unchanged in the
/// broadcast shape. The engine sums it back down to each input's shape.
#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        Ok(vec![grad_output.clone(), grad_output.clone()])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "AddBackward"
    }
}

/// Elementwise `a + b` with NumPy broadcasting.
///
/// # Errors
/// `BroadcastError` if the shapes are incompatible.
pub(crate) fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, FerrogradError> {
    let value = broadcast_binary(&a.value(), &b.value(), "add", |x, y| x + y)?;
    Ok(Tensor::from_op(value, &[a, b], || {
        Arc::new(AddBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
