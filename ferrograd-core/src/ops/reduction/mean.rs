use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::utils::check_finite_output;
use crate::tensor::Tensor;
use ndarray::ArrayD;
use std::sync::Arc;

use super::sum::reduce_sum;
use super::utils::{expand_reduced_grad, process_reduction_axis};

#[derive(Debug)]
struct MeanBackward {
    input: Tensor,
    input_shape: Vec<usize>,
    axis: Option<usize>,
    count: usize,
}

impl BackwardOp for MeanBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        let expanded = expand_reduced_grad(grad_output, &self.input_shape, self.axis)?;
        Ok(vec![expanded / self.count as f32])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "MeanBackward"
    }
}

/// Arithmetic mean along `axis`, or over all elements when `axis` is `None`.
///
/// # Errors
/// `NonFiniteValue` when the mean of finite values is not finite (overflow in the sum, or an
/// empty reduction).
pub(crate) fn mean_op(
    input: &Tensor,
    axis: Option<isize>,
    keep_dims: bool,
) -> Result<Tensor, FerrogradError> {
    let value = input.value();
    let input_shape = value.shape().to_vec();
    let axis = process_reduction_axis(input_shape.len(), axis, "mean")?;
    let count = match axis {
        None => value.len(),
        Some(a) => input_shape[a],
    };
    let output = reduce_sum(&value, axis, keep_dims) / count as f32;
    check_finite_output(&value, &output, "mean")?;
    Ok(Tensor::from_op(output, &[input], || {
        Arc::new(MeanBackward {
            input: input.clone(),
            input_shape,
            axis,
            count,
        })
    }))
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
