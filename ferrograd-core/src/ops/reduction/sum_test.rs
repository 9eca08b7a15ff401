use crate::error::FerrogradError;
use crate::tensor::Tensor;
use crate::utils::testing::{check_array_near, check_tensor_near};

fn sample() -> Tensor {
    Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3]).unwrap()
}

#[test]
fn test_sum_all() {
    let s = sample().sum(None, false).unwrap();
    check_tensor_near(&s, &[], &[21.0], 1e-6);
    let k = sample().sum(None, true).unwrap();
    check_tensor_near(&k, &[1, 1], &[21.0], 1e-6);
}

#[test]
fn test_sum_axes() {
    check_tensor_near(&sample().sum(Some(0), false).unwrap(), &[3], &[5.0, 7.0, 9.0], 1e-6);
    check_tensor_near(&sample().sum(Some(-1), true).unwrap(), &[2, 1], &[6.0, 15.0], 1e-6);
}

#[test]
fn test_sum_invalid_axis() {
    let err = sample().sum(Some(2), false).unwrap_err();
    assert!(matches!(err, FerrogradError::InvalidAxis { axis: 2, rank: 2, .. }));
}

#[test]
fn test_sum_backward_axis() {
    let x = sample().with_requires_grad(true);
    let s = x.sum(Some(1), false).unwrap();
    let w = Tensor::new(vec![2.0, -1.0], vec![2]).unwrap();
    s.mul(&w).unwrap().sum(None, false).unwrap().backward().unwrap();
    check_array_near(&x.grad().unwrap(), &[2, 3], &[2.0, 2.0, 2.0, -1.0, -1.0, -1.0], 1e-6);
}
