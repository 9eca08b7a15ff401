use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::{Array2, ArrayD, Axis, IxDyn};
use num_traits::ToPrimitive;
use std::sync::Arc;

/// Backward context for an embedding lookup.
///
/// The weight gradient is a scatter-add: row `indices[i]` accumulates row `i` of the
/// flattened output gradient, so repeated indices sum their contributions. The indices
/// are not differentiable and are not listed as inputs.
#[derive(Debug)]
struct EmbeddingBackward {
    weight: Tensor,
    num_embeddings: usize,
    embedding_dim: usize,
    indices: Vec<usize>,
}

impl BackwardOp for EmbeddingBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        let rows = Array2::from_shape_vec(
            (self.indices.len(), self.embedding_dim),
            grad_output.iter().copied().collect(),
        )
        .map_err(|_| FerrogradError::ShapeMismatch {
            expected: vec![self.indices.len(), self.embedding_dim],
            actual: grad_output.shape().to_vec(),
            operation: "embedding backward".to_string(),
        })?;

        let mut grad_weight = Array2::<f32>::zeros((self.num_embeddings, self.embedding_dim));
        for (row, &index) in rows.axis_iter(Axis(0)).zip(&self.indices) {
            grad_weight.row_mut(index).scaled_add(1.0, &row);
        }
        Ok(vec![grad_weight.into_dyn()])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.weight.clone()]
    }

    fn name(&self) -> &'static str {
        "EmbeddingBackward"
    }
}

/// Converts index values stored as `f32` into row numbers, rejecting anything that is not a
/// non-negative integer below `num_embeddings`.
fn validate_indices(values: &ArrayD<f32>, num_embeddings: usize) -> Result<Vec<usize>, FerrogradError> {
    values
        .iter()
        .map(|&v| {
            v.to_usize()
                .filter(|&i| v.fract() == 0.0 && i < num_embeddings)
                .ok_or_else(|| FerrogradError::IndexOutOfBounds {
                    index: v,
                    size: num_embeddings,
                    operation: "embedding".to_string(),
                })
        })
        .collect()
}

/// Gathers rows of `weight` (shape `[num_embeddings, embedding_dim]`) at `indices`.
///
/// The output has shape `indices.shape() ++ [embedding_dim]`; a scalar index yields a
/// single row of shape `[embedding_dim]`.
///
/// # Errors
/// * `ShapeMismatch` if `weight` is not rank 2.
/// * `IndexOutOfBounds` if an index is negative, fractional, or not below `num_embeddings`.
pub(crate) fn embedding_op(indices: &Tensor, weight: &Tensor) -> Result<Tensor, FerrogradError> {
    let weight_value = weight.value();
    let (num_embeddings, embedding_dim) = match weight_value.shape() {
        &[n, d] => (n, d),
        _ => {
            return Err(FerrogradError::ShapeMismatch {
                expected: vec![0, 0],
                actual: weight_value.shape().to_vec(),
                operation: "embedding (weight must be 2-D)".to_string(),
            })
        }
    };

    let index_values = indices.value();
    let rows = validate_indices(&index_values, num_embeddings)?;

    let mut output_shape = index_values.shape().to_vec();
    output_shape.push(embedding_dim);
    let mut data = Vec::with_capacity(rows.len() * embedding_dim);
    for &row in &rows {
        data.extend(weight_value.index_axis(Axis(0), row).iter().copied());
    }
    let output = ArrayD::from_shape_vec(IxDyn(&output_shape), data)
        .map_err(|e| FerrogradError::InternalError(e.to_string()))?;

    Ok(Tensor::from_op(output, &[indices, weight], || {
        Arc::new(EmbeddingBackward {
            weight: weight.clone(),
            num_embeddings,
            embedding_dim,
            indices: rows,
        })
    }))
}

#[cfg(test)]
#[path = "embedding_test.rs"]
mod tests;
