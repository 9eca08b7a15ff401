//! Utility functions for reduction operations.

use crate::error::FerrogradError;
use crate::tensor::utils::normalize_axis;
use ndarray::{ArrayD, IxDyn};

/// Resolves the reduction axis against the input rank.
///
/// `None` means a global reduction over every element.
pub(crate) fn process_reduction_axis(
    rank: usize,
    axis: Option<isize>,
    operation: &str,
) -> Result<Option<usize>, FerrogradError> {
    axis.map(|a| normalize_axis(a, rank, operation)).transpose()
}

/// Output shape of a reduction.
///
/// A global reduction yields `[]`, or all-ones of the input rank with `keep_dims`.
pub(crate) fn reduction_output_shape(
    input_shape: &[usize],
    axis: Option<usize>,
    keep_dims: bool,
) -> Vec<usize> {
    match (axis, keep_dims) {
        (None, false) => vec![],
        (None, true) => vec![1; input_shape.len()],
        (Some(a), false) => input_shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != a)
            .map(|(_, &d)| d)
            .collect(),
        (Some(a), true) => {
            let mut shape = input_shape.to_vec();
            shape[a] = 1;
            shape
        }
    }
}

/// Reshapes a reduced array (with or without kept dimensions) to the rank-preserving form,
/// where every reduced dimension has size 1.
pub(crate) fn to_keepdim_shape(
    reduced: &ArrayD<f32>,
    input_shape: &[usize],
    axis: Option<usize>,
) -> Result<ArrayD<f32>, FerrogradError> {
    let keepdim_shape = reduction_output_shape(input_shape, axis, true);
    ArrayD::from_shape_vec(IxDyn(&keepdim_shape), reduced.iter().copied().collect()).map_err(|_| {
        FerrogradError::ShapeMismatch {
            expected: keepdim_shape.clone(),
            actual: reduced.shape().to_vec(),
            operation: "reduction backward".to_string(),
        }
    })
}

/// Broadcasts the gradient of a reduction's output back over the input shape.
pub(crate) fn expand_reduced_grad(
    grad_output: &ArrayD<f32>,
    input_shape: &[usize],
    axis: Option<usize>,
) -> Result<ArrayD<f32>, FerrogradError> {
    let keepdim = to_keepdim_shape(grad_output, input_shape, axis)?;
    keepdim
        .broadcast(IxDyn(input_shape))
        .map(|view| view.to_owned())
        .ok_or_else(|| FerrogradError::BroadcastError {
            shape1: keepdim.shape().to_vec(),
            shape2: input_shape.to_vec(),
            operation: "reduction backward".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_shapes() {
        assert_eq!(reduction_output_shape(&[2, 3, 4], None, false), Vec::<usize>::new());
        assert_eq!(reduction_output_shape(&[2, 3, 4], None, true), vec![1, 1, 1]);
        assert_eq!(reduction_output_shape(&[2, 3, 4], Some(1), false), vec![2, 4]);
        assert_eq!(reduction_output_shape(&[2, 3, 4], Some(1), true), vec![2, 1, 4]);
    }

    #[test]
    fn test_expand_reduced_grad() {
        let grad = ArrayD::from_shape_vec(IxDyn(&[2]), vec![1.0f32, 2.0]).unwrap();
        let expanded = expand_reduced_grad(&grad, &[2, 3], Some(1)).unwrap();
        assert_eq!(expanded.shape(), &[2, 3]);
        assert_eq!(
            expanded.iter().copied().collect::<Vec<_>>(),
            vec![1.0, 1.0, 1.0, 2.0, 2.0, 2.0]
        );
    }

    #[test]
    fn test_negative_axis_resolution() {
        assert_eq!(process_reduction_axis(3, Some(-2), "max").unwrap(), Some(1));
        assert_eq!(process_reduction_axis(3, None, "max").unwrap(), None);
        assert!(process_reduction_axis(3, Some(3), "max").is_err());
    }
}
