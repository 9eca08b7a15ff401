// src/ops/reduction/mod.rs

pub mod max;
pub mod mean;
pub mod sum;
pub(crate) mod utils;

pub(crate) use max::max_op;
pub(crate) use mean::mean_op;
pub(crate) use sum::sum_op;
