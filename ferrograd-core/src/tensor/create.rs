// src/tensor/create.rs

use crate::tensor::Tensor;
use ndarray::{ArrayD, IxDyn};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a new leaf tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Tensor {
    Tensor::from_array(ArrayD::zeros(IxDyn(shape)))
}

/// Creates a new leaf tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Tensor {
    Tensor::from_array(ArrayD::ones(IxDyn(shape)))
}

/// Creates a new leaf tensor filled with `value`.
pub fn full(shape: &[usize], value: f32) -> Tensor {
    Tensor::from_array(ArrayD::from_elem(IxDyn(shape), value))
}

/// Zeros with the shape of `tensor`. The result is always a fresh leaf.
pub fn zeros_like(tensor: &Tensor) -> Tensor {
    zeros(&tensor.shape())
}

pub fn ones_like(tensor: &Tensor) -> Tensor {
    ones(&tensor.shape())
}

/// `[0, 1, ..., n - 1]` as a rank-1 tensor.
pub fn arange(n: usize) -> Tensor {
    Tensor::from_array(ArrayD::from_shape_fn(IxDyn(&[n]), |idx| idx[0] as f32))
}

/// Samples every element independently from U[0, 1).
pub fn uniform(shape: &[usize]) -> Tensor {
    let mut rng = rand::thread_rng();
    Tensor::from_array(ArrayD::from_shape_simple_fn(IxDyn(shape), || rng.gen::<f32>()))
}

/// Samples every element independently from the standard normal distribution.
pub fn randn(shape: &[usize]) -> Tensor {
    let mut rng = rand::thread_rng();
    Tensor::from_array(ArrayD::from_shape_simple_fn(IxDyn(shape), || {
        StandardNormal.sample(&mut rng)
    }))
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
