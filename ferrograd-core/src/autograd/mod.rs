//! Reverse-mode automatic differentiation.
//!
//! - [`BackwardOp`]: the backward half of every differentiable operation.
//! - [`graph`]: node identity and the topological traversal used by `Tensor::backward`.
//! - [`grad_mode`]: scoped switch controlling whether operations record a graph.
//! - [`grad_check`]: finite-difference verification of backward rules.

pub mod backward_op;
pub mod grad_check;
pub mod grad_mode;
pub mod graph;

pub use backward_op::BackwardOp;
pub use grad_mode::{enable_grad, is_grad_enabled, no_grad, set_grad_enabled, with_no_grad, GradModeGuard};

use crate::tensor::Tensor;

/// Decides whether the output of an operation over `inputs` joins the graph.
///
/// True only when gradient mode is active and at least one input requires grad.
pub(crate) fn should_track(inputs: &[&Tensor]) -> bool {
    is_grad_enabled() && inputs.iter().any(|t| t.requires_grad())
}
