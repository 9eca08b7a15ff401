use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::ArrayD;
use std::sync::Arc;

use super::broadcast_binary;

/// Backward context for elementwise multiplication.
///
/// Input values are read back from the input handles; values never change after creation.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        let grad_a = broadcast_binary(grad_output, &self.b.value(), "mul backward", |g, y| g * y)?;
        let grad_b = broadcast_binary(grad_output, &self.a.value(), "mul backward", |g, x| g * x)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "MulBackward"
    }
}

/// Elementwise `a * b` with NumPy broadcasting.
pub(crate) fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, FerrogradError> {
    let value = broadcast_binary(&a.value(), &b.value(), "mul", |x, y| x * y)?;
    Ok(Tensor::from_op(value, &[a, b], || {
        Arc::new(MulBackward {
            a: a.clone(),
            b: b.clone(),
        })
    }))
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
