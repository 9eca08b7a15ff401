use super::{MSELoss, Reduction};
use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::utils::testing::{check_array_near, create_test_tensor_with_grad};
use approx::assert_relative_eq;

#[test]
fn test_mse_mean_forward() {
    let input = Tensor::new(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]).unwrap();
    let target = Tensor::new(vec![1.5, 2.0, 2.0, 6.0], vec![2, 2]).unwrap();
    let loss = MSELoss::default().forward(&input, &target).unwrap();
    assert!(loss.shape().is_empty());
    // (0.25 + 0 + 1 + 4) / 4
    assert_relative_eq!(loss.item().unwrap(), 1.3125, epsilon = 1e-6);
}

#[test]
fn test_mse_sum_forward() {
    let input = Tensor::new(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let target = Tensor::new(vec![0.0, 0.0, 0.0], vec![3]).unwrap();
    let loss = MSELoss::new(Reduction::Sum).forward(&input, &target).unwrap();
    assert_relative_eq!(loss.item().unwrap(), 14.0, epsilon = 1e-6);
}

#[test]
fn test_mse_backward_mean() {
    let input = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0, 4.0], vec![4]);
    let target = Tensor::new(vec![0.0, 2.0, 5.0, 4.0], vec![4]).unwrap();
    let loss = MSELoss::new(Reduction::Mean).forward(&input, &target).unwrap();
    loss.backward().unwrap();
    // 2 * (input - target) / n
    check_array_near(&input.grad().unwrap(), &[4], &[0.5, 0.0, -1.0, 0.0], 1e-6);
    assert!(target.grad().is_none());
}

#[test]
fn test_mse_backward_reaches_target() {
    let input = Tensor::new(vec![3.0, -1.0], vec![2]).unwrap();
    let target = create_test_tensor_with_grad(vec![1.0, 1.0], vec![2]);
    MSELoss::new(Reduction::Sum)
        .forward(&input, &target)
        .unwrap()
        .backward()
        .unwrap();
    check_array_near(&target.grad().unwrap(), &[2], &[-4.0, 4.0], 1e-6);
}

#[test]
fn test_mse_shape_mismatch() {
    let input = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let target = Tensor::new(vec![1.0, 2.0], vec![2, 1]).unwrap();
    let err = MSELoss::default().forward(&input, &target).unwrap_err();
    assert!(matches!(err, FerrogradError::ShapeMismatch { .. }));
}
