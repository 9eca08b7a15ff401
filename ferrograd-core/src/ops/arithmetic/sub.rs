use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::ArrayD;
use std::sync::Arc;

use super::broadcast_binary;

#[derive(Debug)]
struct SubBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for SubBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        Ok(vec![grad_output.clone(), grad_output.mapv(|g| -g)])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "SubBackward"
    }
}

/// Elementwise `a - b` with NumPy broadcasting.
pub(crate) fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, FerrogradError> {
    let value = broadcast_binary(&a.value(), &b.value(), "sub", |x, y| x - y)?;
    Ok(Tensor::from_op(value, &[a, b], || {
        Arc::new(SubBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
