use ferrograd_core::Tensor;

/// Installs `env_logger` once per test binary; `RUST_LOG=trace` shows the traversal.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn leaf(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub fn grad_leaf(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    leaf(data, shape).with_requires_grad(true)
}
