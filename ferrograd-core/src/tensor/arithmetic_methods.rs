use crate::error::FerrogradError;
use crate::ops::activation::{elu::DEFAULT_ALPHA, elu_op, relu_op};
use crate::ops::arithmetic::{add_op, add_scalar_op, mul_op, mul_scalar_op, sub_op};
use crate::ops::indexing::embedding_op;
use crate::tensor::Tensor;

/// Elementwise arithmetic, activations and lookups.
impl Tensor {
    /// Elementwise sum with broadcasting.
    pub fn add(&self, other: &Tensor) -> Result<Tensor, FerrogradError> {
        add_op(self, other)
    }

    /// Elementwise difference with broadcasting.
    pub fn sub(&self, other: &Tensor) -> Result<Tensor, FerrogradError> {
        sub_op(self, other)
    }

    /// Elementwise product with broadcasting.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor, FerrogradError> {
        mul_op(self, other)
    }

    pub fn mul_scalar(&self, scalar: f32) -> Result<Tensor, FerrogradError> {
        mul_scalar_op(self, scalar)
    }

    pub fn add_scalar(&self, scalar: f32) -> Result<Tensor, FerrogradError> {
        add_scalar_op(self, scalar)
    }

    pub fn relu(&self) -> Result<Tensor, FerrogradError> {
        relu_op(self)
    }

    /// Exponential Linear Unit: `x` for `x > 0`, `alpha * (exp(x) - 1)` otherwise.
    pub fn elu(&self, alpha: f32) -> Result<Tensor, FerrogradError> {
        elu_op(self, alpha)
    }

    /// [`Tensor::elu`] with `alpha = 1.0`.
    pub fn elu_default(&self) -> Result<Tensor, FerrogradError> {
        elu_op(self, DEFAULT_ALPHA)
    }

    /// Treats `self` as integral indices into the rows of `weight` and gathers them.
    ///
    /// See [`crate::nn::layers::Embedding`] for the layer form.
    pub fn embedding(&self, weight: &Tensor) -> Result<Tensor, FerrogradError> {
        embedding_op(self, weight)
    }
}
