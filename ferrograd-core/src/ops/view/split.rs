use crate::autograd::BackwardOp;
use crate::error::FerrogradError;
use crate::tensor::utils::normalize_axis;
use crate::tensor::Tensor;
use ndarray::{ArrayD, Axis, IxDyn, Slice};
use std::ops::Range;
use std::sync::Arc;

/// How to partition an axis in [`Tensor::split`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitSize {
    /// Pieces of `n` elements; the last piece holds the remainder and may be shorter.
    Size(usize),
    /// Explicit piece lengths, which must sum to the axis length.
    Sizes(Vec<usize>),
    /// `k` pieces of equal length; the axis length must be divisible by `k`.
    Sections(usize),
}

impl Default for SplitSize {
    fn default() -> Self {
        SplitSize::Size(1)
    }
}

/// Backward context of one split piece.
///
/// Its gradient is scattered into the piece's range of a zero gradient with the input's
/// shape. Sibling pieces cover disjoint ranges; the engine sums their contributions.
#[derive(Debug)]
struct SplitBackward {
    input: Tensor,
    input_shape: Vec<usize>,
    axis: usize,
    range: Range<usize>,
}

impl BackwardOp for SplitBackward {
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError> {
        let mut grad_input = ArrayD::zeros(IxDyn(&self.input_shape));
        let mut target = grad_input.slice_axis_mut(Axis(self.axis), Slice::from(self.range.clone()));
        if target.shape() != grad_output.shape() {
            return Err(FerrogradError::ShapeMismatch {
                expected: target.shape().to_vec(),
                actual: grad_output.shape().to_vec(),
                operation: "split backward".to_string(),
            });
        }
        target.assign(grad_output);
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "SplitBackward"
    }
}

fn partition_error(axis: usize, length: usize, message: String) -> FerrogradError {
    FerrogradError::InvalidPartition {
        axis,
        length,
        operation: "split".to_string(),
        message,
    }
}

/// Converts a split request into consecutive, non-overlapping index ranges covering
/// `0..length`.
pub(crate) fn split_ranges(
    length: usize,
    axis: usize,
    split_size: &SplitSize,
) -> Result<Vec<Range<usize>>, FerrogradError> {
    let lengths: Vec<usize> = match split_size {
        SplitSize::Size(0) => {
            return Err(partition_error(axis, length, "split size must be positive".to_string()))
        }
        SplitSize::Size(n) => {
            if length == 0 {
                vec![0]
            } else {
                (0..length).step_by(*n).map(|start| (*n).min(length - start)).collect()
            }
        }
        SplitSize::Sizes(sizes) => {
            let total: usize = sizes.iter().sum();
            if total != length {
                return Err(partition_error(
                    axis,
                    length,
                    format!("sizes {:?} sum to {}, not {}", sizes, total, length),
                ));
            }
            sizes.clone()
        }
        SplitSize::Sections(0) => {
            return Err(partition_error(axis, length, "number of sections must be positive".to_string()))
        }
        SplitSize::Sections(k) => {
            if length % k != 0 {
                return Err(partition_error(
                    axis,
                    length,
                    format!("{} sections do not divide the axis evenly", k),
                ));
            }
            vec![length / k; *k]
        }
    };

    let mut start = 0;
    Ok(lengths
        .into_iter()
        .map(|len| {
            let range = start..start + len;
            start += len;
            range
        })
        .collect())
}

/// Materializes each range of `axis` as its own tensor with its own backward context.
pub(crate) fn split_into_ranges(
    input: &Tensor,
    axis: usize,
    ranges: Vec<Range<usize>>,
) -> Vec<Tensor> {
    let value = input.value();
    let input_shape = value.shape().to_vec();
    ranges
        .into_iter()
        .map(|range| {
            let piece = value
                .slice_axis(Axis(axis), Slice::from(range.clone()))
                .to_owned();
            Tensor::from_op(piece, &[input], || {
                Arc::new(SplitBackward {
                    input: input.clone(),
                    input_shape: input_shape.clone(),
                    axis,
                    range,
                })
            })
        })
        .collect()
}

/// Partitions `input` along `axis` into consecutive pieces.
///
/// # Errors
/// * `InvalidAxis` if `axis` is out of range (negative values count from the end).
/// * `InvalidPartition` if `split_size` disagrees with the axis length.
pub(crate) fn split_op(
    input: &Tensor,
    split_size: &SplitSize,
    axis: isize,
) -> Result<Vec<Tensor>, FerrogradError> {
    let shape = input.shape();
    let axis = normalize_axis(axis, shape.len(), "split")?;
    let ranges = split_ranges(shape[axis], axis, split_size)?;
    log::trace!("split axis {} of {:?} into {} piece(s)", axis, shape, ranges.len());
    Ok(split_into_ranges(input, axis, ranges))
}

#[cfg(test)]
#[path = "split_test.rs"]
mod tests;
