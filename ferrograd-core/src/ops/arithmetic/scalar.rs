use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::ArrayD;
use std::sync::Arc;

#[derive(Debug)]
struct MulScalarBackward {
    input: Tensor,
    scalar: f32,
}

impl BackwardOp for MulScalarBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        Ok(vec![grad_output * self.scalar])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "MulScalarBackward"
    }
}

#[derive(Debug)]
struct AddScalarBackward {
    input: Tensor,
}

impl BackwardOp for AddScalarBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        Ok(vec![grad_output.clone()])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "AddScalarBackward"
    }
}

/// `input * scalar`, elementwise.
pub(crate) fn mul_scalar_op(input: &Tensor, scalar: f32) -> Result<Tensor, FerrogradError> {
    let value = input.read_data().value.mapv(|x| x * scalar);
    Ok(Tensor::from_op(value, &[input], || {
        Arc::new(MulScalarBackward {
            input: input.clone(),
            scalar,
        })
    }))
}

/// `input + scalar`, elementwise.
pub(crate) fn add_scalar_op(input: &Tensor, scalar: f32) -> Result<Tensor, FerrogradError> {
    let value = input.read_data().value.mapv(|x| x + scalar);
    Ok(Tensor::from_op(value, &[input], || {
        Arc::new(AddScalarBackward {
            input: input.clone(),
        })
    }))
}

#[cfg(test)]
#[path = "scalar_test.rs"]
mod tests;
