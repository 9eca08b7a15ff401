use crate::error::FerrogradError;
use crate::tensor::Tensor;
use ndarray::ArrayD;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Any operation that creates a non-leaf `Tensor` must have an associated `BackwardOp`
/// implementation. It is stored in the output tensor's `grad_fn` field and holds whatever
/// the forward pass saved (input shapes, masks, split boundaries, pre-activation values).
///
/// The trait requires `Debug + Send + Sync` because the `Arc<dyn BackwardOp>` holding
/// the state is shared by every output of the operation and may be inspected for
/// debugging purposes.
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes the gradients of the operation's inputs with respect to the loss,
    /// given the gradient of the operation's output with respect to the loss.
    ///
    /// # Arguments
    /// * `grad_output`: dL/dOutput, with the same shape as the output produced by the forward
    ///                  pass.
    ///
    /// # Returns
    /// One gradient per entry of [`BackwardOp::inputs`], in the same order. A gradient may be
    /// returned in the *broadcast* shape of the forward pass; the engine sums it back down to
    /// the input's own shape before accumulation, so operations never do this themselves.
    fn backward(&self, grad_output: &ArrayD<f32>) -> Result<Vec<ArrayD<f32>>, FerrogradError>;

    /// Returns the input tensors that participated in the forward operation.
    ///
    /// These are the edges the engine walks during traversal. Non-differentiable inputs
    /// (such as embedding indices) are not listed.
    fn inputs(&self) -> Vec<Tensor>;

    /// Short operation name used in logs and error messages.
    fn name(&self) -> &'static str;
}
