use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::{ArrayD, IxDyn};
use std::sync::Arc;

#[derive(Debug)]
struct ReshapeBackward {
    input: Tensor,
    input_shape: Vec<usize>,
}

impl BackwardOp for ReshapeBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        Ok(vec![reshape_array(grad_output, &self.input_shape, "reshape backward")?])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "ReshapeBackward"
    }
}

/// Resolves a requested shape containing at most one `-1` against `numel` elements.
pub(crate) fn resolve_shape(
    input_shape: &[usize],
    requested: &[isize],
) -> Result<Vec<usize>, FerrogradError> {
    let numel: usize = input_shape.iter().product();
    let mismatch = || FerrogradError::ShapeMismatch {
        expected: input_shape.to_vec(),
        actual: requested.iter().map(|&d| d.max(0) as usize).collect(),
        operation: "reshape".to_string(),
    };

    let mut inferred: Option<usize> = None;
    let mut known: usize = 1;
    for (i, &d) in requested.iter().enumerate() {
        match d {
            -1 if inferred.is_none() => inferred = Some(i),
            d if d >= 0 => known *= d as usize,
            _ => return Err(mismatch()),
        }
    }

    let mut shape: Vec<usize> = requested.iter().map(|&d| d.max(0) as usize).collect();
    if let Some(i) = inferred {
        if known == 0 || numel % known != 0 {
            return Err(mismatch());
        }
        shape[i] = numel / known;
    } else if known != numel {
        return Err(mismatch());
    }
    Ok(shape)
}

fn reshape_array(
    array: &ArrayD<f32>,
    shape: &[usize],
    operation: &str,
) -> Result<ArrayD<f32>, FerrogradError> {
    ArrayD::from_shape_vec(IxDyn(shape), array.iter().copied().collect()).map_err(|_| {
        FerrogradError::ShapeMismatch {
            expected: shape.to_vec(),
            actual: array.shape().to_vec(),
            operation: operation.to_string(),
        }
    })
}

/// Returns a tensor with the same elements in row-major order and a new shape.
///
/// One dimension may be `-1`, in which case it is inferred from the element count.
///
/// # Errors
/// `ShapeMismatch` if the element counts differ, more than one `-1` is given, or a
/// dimension is negative.
pub(crate) fn reshape_op(input: &Tensor, shape: &[isize]) -> Result<Tensor, FerrogradError> {
    let value = input.value();
    let input_shape = value.shape().to_vec();
    let new_shape = resolve_shape(&input_shape, shape)?;
    let output = reshape_array(&value, &new_shape, "reshape")?;
    Ok(Tensor::from_op(output, &[input], || {
        Arc::new(ReshapeBackward {
            input: input.clone(),
            input_shape,
        })
    }))
}

#[cfg(test)]
#[path = "reshape_test.rs"]
mod tests;
