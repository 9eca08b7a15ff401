use crate::tensor::Tensor;
use crate::utils::testing::{check_array_near, check_tensor_near};

#[test]
fn test_relu_forward() {
    let x = Tensor::new(vec![-1.0, 0.0, 2.5, -0.1], vec![2, 2]).unwrap();
    check_tensor_near(&x.relu().unwrap(), &[2, 2], &[0.0, 0.0, 2.5, 0.0], 1e-6);
}

#[test]
fn test_relu_backward_masks_non_positive() {
    let x = Tensor::new(vec![-1.0, 0.0, 2.5, 3.0], vec![4]).unwrap().with_requires_grad(true);
    let y = x.relu().unwrap();
    assert_eq!(y.grad_fn().unwrap().name(), "ReluBackward");
    y.sum(None, false).unwrap().backward().unwrap();
    check_array_near(&x.grad().unwrap(), &[4], &[0.0, 0.0, 1.0, 1.0], 1e-6);
}
