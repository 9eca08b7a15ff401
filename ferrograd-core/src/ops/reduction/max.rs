use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::{ArrayD, Axis, IxDyn, Zip};
use std::sync::Arc;

use super::utils::{expand_reduced_grad, process_reduction_axis, reduction_output_shape};

/// Backward operation context for `max` reduction.
///
/// Gradient flows to *every* input position equal to the maximum of its reduction slice,
/// split evenly between them: with `k` tied positions each receives `grad / k`. Tie counts
/// are computed independently for each output position. A NaN maximum routes the gradient
/// to the NaN positions of its slice.
///
/// The output value is saved (in its rank-preserving form) rather than the output node, so
/// the context never keeps its own output alive.
#[derive(Debug)]
struct MaxBackward {
    input: Tensor,
    axis: Option<usize>,
    /// Forward result with the reduced dimension(s) kept as size 1.
    max_keepdim: ArrayD<f32>,
}

impl BackwardOp for MaxBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        let input = self.input.value();
        let input_shape = input.shape().to_vec();

        let max_expanded = self
            .max_keepdim
            .broadcast(IxDyn(&input_shape))
            .ok_or_else(|| {
                FerrogradError::InternalError(format!(
                    "MaxBackward: saved max {:?} does not broadcast to input {:?}",
                    self.max_keepdim.shape(),
                    input_shape
                ))
            })?;
        let mask: ArrayD<f32> = Zip::from(&input)
            .and(&max_expanded)
            .map_collect(|&x, &m| if x == m || (x.is_nan() && m.is_nan()) { 1.0 } else { 0.0 });

        let counts = match self.axis {
            None => ArrayD::from_elem(IxDyn(&vec![1; input_shape.len()]), mask.sum()),
            Some(a) => mask.sum_axis(Axis(a)).insert_axis(Axis(a)),
        };
        let counts = counts.broadcast(IxDyn(&input_shape)).ok_or_else(|| {
            FerrogradError::InternalError("MaxBackward: tie counts do not broadcast".to_string())
        })?;
        let grad_expanded = expand_reduced_grad(grad_output, &input_shape, self.axis)?;

        let grad_input = Zip::from(&mask)
            .and(&grad_expanded)
            .and(&counts)
            .map_collect(|&m, &g, &c| if m > 0.0 { g / c } else { 0.0 });
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "MaxBackward"
    }
}

/// NaN-propagating maximum: once a NaN is seen it wins over every later value.
fn nan_max(acc: f32, x: f32) -> f32 {
    if x.is_nan() || x > acc {
        x
    } else {
        acc
    }
}

/// Maximum along `axis` (negative axes count from the end), or over all elements when
/// `axis` is `None`. A global reduction without `keep_dims` yields a scalar of shape `[]`.
///
/// # Errors
/// * `InvalidAxis` if `axis` is out of range.
/// * `ShapeMismatch` if the reduction runs over zero elements.
pub(crate) fn max_op(
    input: &Tensor,
    axis: Option<isize>,
    keep_dims: bool,
) -> Result<Tensor, FerrogradError> {
    let value = input.value();
    let input_shape = value.shape().to_vec();
    let axis = process_reduction_axis(input_shape.len(), axis, "max")?;

    let reduced_len = match axis {
        None => value.len(),
        Some(a) => input_shape[a],
    };
    if reduced_len == 0 {
        return Err(FerrogradError::ShapeMismatch {
            expected: vec![1],
            actual: input_shape,
            operation: "max (reduction over zero elements)".to_string(),
        });
    }

    let max_keepdim = match axis {
        None => {
            let m = value.fold(f32::NEG_INFINITY, |acc, &x| nan_max(acc, x));
            ArrayD::from_elem(IxDyn(&vec![1; input_shape.len()]), m)
        }
        Some(a) => value
            .fold_axis(Axis(a), f32::NEG_INFINITY, |&acc, &x| nan_max(acc, x))
            .insert_axis(Axis(a)),
    };
    let output = if keep_dims {
        max_keepdim.clone()
    } else {
        let output_shape = reduction_output_shape(&input_shape, axis, false);
        ArrayD::from_shape_vec(IxDyn(&output_shape), max_keepdim.iter().copied().collect())
            .map_err(|e| FerrogradError::InternalError(e.to_string()))?
    };

    Ok(Tensor::from_op(output, &[input], || {
        Arc::new(MaxBackward {
            input: input.clone(),
            axis,
            max_keepdim,
        })
    }))
}

#[cfg(test)]
#[path = "max_test.rs"]
mod tests;
