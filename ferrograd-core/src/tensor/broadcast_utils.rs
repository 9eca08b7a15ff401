use crate::error::FerrogradError;
use ndarray::{ArrayD, Axis};
use std::cmp::max;

/// Determines the output shape resulting from broadcasting two input shapes.
///
/// Follows NumPy broadcasting rules: shapes are aligned on their trailing dimensions, the
/// shorter one is padded with leading 1s, and each pair of dimensions must be equal or
/// contain a 1.
///
/// # Errors
/// `BroadcastError` naming `operation` when a dimension pair is incompatible.
pub fn broadcast_shapes(
    shape_a: &[usize],
    shape_b: &[usize],
    operation: &str,
) -> Result<Vec<usize>, FerrogradError> {
    let rank_a = shape_a.len();
    let rank_b = shape_b.len();
    let max_rank = max(rank_a, rank_b);
    let mut result_shape = vec![0; max_rank];

    for i in 0..max_rank {
        let dim_a = if i < max_rank - rank_a { 1 } else { shape_a[i - (max_rank - rank_a)] };
        let dim_b = if i < max_rank - rank_b { 1 } else { shape_b[i - (max_rank - rank_b)] };
        result_shape[i] = match (dim_a, dim_b) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => {
                return Err(FerrogradError::BroadcastError {
                    shape1: shape_a.to_vec(),
                    shape2: shape_b.to_vec(),
                    operation: operation.to_string(),
                })
            }
        };
    }
    Ok(result_shape)
}

/// Sums `grad` over every dimension that broadcasting created or stretched, so that the
/// result has exactly `target_shape`.
///
/// Leading dimensions beyond the target's rank are summed away; dimensions where the target
/// has size 1 but the gradient does not are summed with the axis kept.
///
/// # Errors
/// `ShapeMismatch` if `grad` cannot have been produced by broadcasting `target_shape`.
pub fn reduce_to_shape(
    grad: ArrayD<f32>,
    target_shape: &[usize],
) -> Result<ArrayD<f32>, FerrogradError> {
    if grad.shape() == target_shape {
        return Ok(grad);
    }
    let mismatch = |actual: &[usize]| FerrogradError::ShapeMismatch {
        expected: target_shape.to_vec(),
        actual: actual.to_vec(),
        operation: "broadcast gradient reduction".to_string(),
    };

    let original_shape = grad.shape().to_vec();
    if original_shape.len() < target_shape.len() {
        return Err(mismatch(&original_shape));
    }

    let mut reduced = grad;
    while reduced.ndim() > target_shape.len() {
        reduced = reduced.sum_axis(Axis(0));
    }
    for (axis, &target_dim) in target_shape.iter().enumerate() {
        let current_dim = reduced.shape()[axis];
        if current_dim == target_dim {
            continue;
        }
        if target_dim != 1 {
            return Err(mismatch(&original_shape));
        }
        reduced = reduced.sum_axis(Axis(axis)).insert_axis(Axis(axis));
    }
    Ok(reduced)
}
