use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::{ArrayD, Zip};
use std::sync::Arc;

#[derive(Debug)]
struct ReluBackward {
    input: Tensor,
}

impl BackwardOp for ReluBackward {
    /// grad = grad_output * (input > 0)
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        let input = self.input.value();
        let grad_input = Zip::from(&input)
            .and(grad_output)
            .map_collect(|&x, &g| if x > 0.0 { g } else { 0.0 });
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "ReluBackward"
    }
}

/// ReLU(x) = max(0, x), elementwise.
pub(crate) fn relu_op(input: &Tensor) -> Result<Tensor, FerrogradError> {
    let value = input.read_data().value.mapv(|x| if x > 0.0 { x } else { 0.0 });
    Ok(Tensor::from_op(value, &[input], || {
        Arc::new(ReluBackward {
            input: input.clone(),
        })
    }))
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
