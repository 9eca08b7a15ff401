use crate::error::FerrogradError;
use crate::ops::reduction::{max_op, mean_op, sum_op};
use crate::tensor::Tensor;

impl Tensor {
    /// Sums the elements along `axis` (negative values count from the end), or all elements
    /// when `axis` is `None`. Delegates to `ops::reduction::sum::sum_op`.
    pub fn sum(&self, axis: Option<isize>, keep_dims: bool) -> Result<Tensor, FerrogradError> {
        sum_op(self, axis, keep_dims)
    }

    /// Computes the mean along `axis`, or over all elements when `axis` is `None`.
    /// Delegates to `ops::reduction::mean::mean_op`.
    pub fn mean(&self, axis: Option<isize>, keep_dims: bool) -> Result<Tensor, FerrogradError> {
        mean_op(self, axis, keep_dims)
    }

    /// Computes the maximum along `axis`, dropping the reduced dimension. A global maximum
    /// (`axis = None`) has shape `[]`.
    ///
    /// In the backward pass, tied maxima share the gradient evenly.
    ///
    /// # Example
    /// ```
    /// use ferrograd_core::Tensor;
    ///
    /// let x = Tensor::new(vec![1.0, 9.0, 9.0], vec![3]).unwrap().with_requires_grad(true);
    /// let m = x.max(None).unwrap();
    /// m.backward().unwrap();
    /// assert_eq!(x.grad().unwrap().iter().copied().collect::<Vec<_>>(), vec![0.0, 0.5, 0.5]);
    /// ```
    pub fn max(&self, axis: Option<isize>) -> Result<Tensor, FerrogradError> {
        max_op(self, axis, false)
    }

    /// Like [`Tensor::max`], but keeps the reduced dimension(s) with size 1.
    pub fn max_keepdim(&self, axis: Option<isize>) -> Result<Tensor, FerrogradError> {
        max_op(self, axis, true)
    }
}
