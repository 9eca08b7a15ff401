use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::{ArrayD, Axis, IxDyn};
use std::sync::Arc;

use super::utils::{expand_reduced_grad, process_reduction_axis, reduction_output_shape};

/// Backward context for `sum`: every input element receives the gradient of the output
/// position it was summed into.
#[derive(Debug)]
struct SumBackward {
    input: Tensor,
    input_shape: Vec<usize>,
    axis: Option<usize>,
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        Ok(vec![expand_reduced_grad(grad_output, &self.input_shape, self.axis)?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "SumBackward"
    }
}

/// Sums the input along `axis`, or over all elements when `axis` is `None`.
pub(crate) fn sum_op(
    input: &Tensor,
    axis: Option<isize>,
    keep_dims: bool,
) -> Result<Tensor, FerrogradError> {
    let value = input.value();
    let input_shape = value.shape().to_vec();
    let axis = process_reduction_axis(input_shape.len(), axis, "sum")?;
    let output = reduce_sum(&value, axis, keep_dims);
    Ok(Tensor::from_op(output, &[input], || {
        Arc::new(SumBackward {
            input: input.clone(),
            input_shape,
            axis,
        })
    }))
}

/// Raw-array sum shared by `sum` and `mean`.
pub(crate) fn reduce_sum(value: &ArrayD<f32>, axis: Option<usize>, keep_dims: bool) -> ArrayD<f32> {
    match axis {
        None => {
            let shape = reduction_output_shape(value.shape(), None, keep_dims);
            ArrayD::from_elem(IxDyn(&shape), value.sum())
        }
        Some(a) => {
            let reduced = value.sum_axis(Axis(a));
            if keep_dims {
                reduced.insert_axis(Axis(a))
            } else {
                reduced
            }
        }
    }
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
