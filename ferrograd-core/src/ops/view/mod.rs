// src/ops/view/mod.rs

pub mod chunk;
pub mod reshape;
pub mod split;

pub(crate) use chunk::chunk_op;
pub(crate) use reshape::reshape_op;
pub(crate) use split::split_op;

pub use split::SplitSize;
