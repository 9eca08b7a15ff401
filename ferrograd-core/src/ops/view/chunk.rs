use crate::error::FerrogradError;
use crate::tensor::utils::normalize_axis;
use crate::tensor::Tensor;
use std::ops::Range;

use super::split::split_into_ranges;

/// Ranges of `n` chunks over `length` elements: the first `length % n` chunks hold one
/// element more than the rest. With `n > length` the trailing chunks are empty.
pub(crate) fn chunk_ranges(length: usize, n: usize) -> Vec<Range<usize>> {
    let base = length / n;
    let remainder = length % n;
    let mut start = 0;
    (0..n)
        .map(|i| {
            let len = base + usize::from(i < remainder);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Partitions `input` into exactly `n` pieces along `axis`.
///
/// # Errors
/// * `InvalidAxis` if `axis` is out of range.
/// * `InvalidPartition` if `n == 0`.
pub(crate) fn chunk_op(input: &Tensor, n: usize, axis: isize) -> Result<Vec<Tensor>, FerrogradError> {
    let shape = input.shape();
    let axis = normalize_axis(axis, shape.len(), "chunk")?;
    if n == 0 {
        return Err(FerrogradError::InvalidPartition {
            axis,
            length: shape[axis],
            operation: "chunk".to_string(),
            message: "number of chunks must be positive".to_string(),
        });
    }
    Ok(split_into_ranges(input, axis, chunk_ranges(shape[axis], n)))
}

#[cfg(test)]
#[path = "chunk_test.rs"]
mod tests;
