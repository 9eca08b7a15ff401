//! # Tensor Operations Module (`ops`)
//!
//! Operations are grouped by functionality. Each operation has:
//!
//! - an `xxx_op` function that validates its inputs, computes the forward value on
//!   `ndarray` arrays and, when the output joins the graph, attaches the backward state;
//! - an `XxxBackward` struct implementing [`BackwardOp`](crate::autograd::BackwardOp) holding
//!   whatever the backward rule needs (input handles, saved masks, split boundaries).
//!
//! The `_op` functions are `pub(crate)`; users reach them through methods on
//! [`Tensor`](crate::tensor::Tensor).
//!
//! ## Submodules
//!
//! - [`arithmetic`]: broadcasting add, sub, mul and scalar variants.
//! - [`reduction`]: sum, mean and max with tie-splitting.
//! - [`activation`]: relu and elu.
//! - [`view`]: reshape, split and chunk.
//! - [`indexing`]: embedding lookup.

pub mod activation;
pub mod arithmetic;
pub mod indexing;
pub mod reduction;
pub mod view;
