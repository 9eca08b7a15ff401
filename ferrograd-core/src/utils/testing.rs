use crate::tensor::Tensor;
use ndarray::ArrayD;

/// Checks that an array has `expected_shape` and that every element is within `tolerance`
/// of `expected_data` (row-major order).
///
/// Panics with the first offending index otherwise.
pub fn check_array_near(
    actual: &ArrayD<f32>,
    expected_shape: &[usize],
    expected_data: &[f32],
    tolerance: f32,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(actual.len(), expected_data.len(), "Data length mismatch");

    for (i, (a, e)) in actual.iter().zip(expected_data.iter()).enumerate() {
        let diff = (*a - *e).abs();
        if diff > tolerance || diff.is_nan() {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Checks if a tensor's value is approximately equal to the expected shape and data.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f32],
    tolerance: f32,
) {
    check_array_near(&actual.value(), expected_shape, expected_data, tolerance);
}

/// Helper to create a leaf tensor that requires gradient for testing.
pub fn create_test_tensor_with_grad(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape)
        .expect("Failed to create test tensor with grad")
        .with_requires_grad(true)
}
