// src/ops/activation/mod.rs

//! # Activation Functions
//!
//! Elementwise non-linearities.
//!
//! - [`relu`]: Rectified Linear Unit.
//! - [`elu`]: Exponential Linear Unit with configurable `alpha`.

pub mod elu;
pub mod relu;

pub(crate) use elu::elu_op;
pub(crate) use relu::relu_op;
