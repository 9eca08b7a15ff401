use crate::error::FerrogradError;
use crate::ops::view::{chunk_op, reshape_op, split_op, SplitSize};
use crate::tensor::Tensor;

/// Shape manipulation and partitioning.
///
/// Every result is a new graph node holding its own copy of the selected elements.
impl Tensor {
    /// Returns a tensor with the same elements and a new shape. One dimension may be `-1`
    /// and is then inferred.
    pub fn reshape(&self, shape: &[isize]) -> Result<Tensor, FerrogradError> {
        reshape_op(self, shape)
    }

    /// Alias of [`Tensor::reshape`].
    pub fn view(&self, shape: &[isize]) -> Result<Tensor, FerrogradError> {
        reshape_op(self, shape)
    }

    /// Partitions the tensor along `axis` into consecutive, non-overlapping pieces.
    ///
    /// # Example
    /// ```
    /// use ferrograd_core::{SplitSize, Tensor};
    ///
    /// let t = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![5]).unwrap();
    /// let pieces = t.split(&SplitSize::Size(2), 0).unwrap();
    /// let sizes: Vec<usize> = pieces.iter().map(|p| p.numel()).collect();
    /// assert_eq!(sizes, vec![2, 2, 1]);
    /// ```
    pub fn split(&self, split_size: &SplitSize, axis: isize) -> Result<Vec<Tensor>, FerrogradError> {
        split_op(self, split_size, axis)
    }

    /// Splits into pieces of length 1 along axis 0.
    pub fn split_default(&self) -> Result<Vec<Tensor>, FerrogradError> {
        split_op(self, &SplitSize::default(), 0)
    }

    /// Partitions the tensor into exactly `n` pieces along `axis`; the first
    /// `len % n` pieces hold one extra element.
    pub fn chunk(&self, n: usize, axis: isize) -> Result<Vec<Tensor>, FerrogradError> {
        chunk_op(self, n, axis)
    }
}
