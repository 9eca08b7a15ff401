use super::DEFAULT_ALPHA;
use crate::autograd::grad_check::check_grad;
use crate::error::{ErrorKind, FerrogradError};
use crate::tensor::Tensor;
use crate::utils::testing::check_tensor_near;
use approx::assert_relative_eq;
use ndarray::{ArrayD, IxDyn};

#[test]
fn test_elu_forward_default_alpha() -> Result<(), FerrogradError> {
    let x = Tensor::new(vec![-2.0, -0.5, 0.0, 0.5, 3.0], vec![5])?;
    let y = x.elu_default()?;
    check_tensor_near(
        &y,
        &[5],
        &[(-2.0f32).exp() - 1.0, (-0.5f32).exp() - 1.0, 0.0, 0.5, 3.0],
        1e-6,
    );
    assert_eq!(DEFAULT_ALPHA, 1.0);
    Ok(())
}

#[test]
fn test_elu_custom_alpha() -> Result<(), FerrogradError> {
    let x = Tensor::new(vec![-1.0, 2.0], vec![2])?.with_requires_grad(true);
    let y = x.elu(0.5)?;
    check_tensor_near(&y, &[2], &[0.5 * ((-1.0f32).exp() - 1.0), 2.0], 1e-6);
    y.sum(None, false)?.backward()?;
    let g = x.grad().unwrap();
    assert_relative_eq!(g[[0]], 0.5 * (-1.0f32).exp(), epsilon = 1e-6);
    assert_relative_eq!(g[[1]], 1.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_elu_knee_at_zero() -> Result<(), FerrogradError> {
    let x = Tensor::scalar(0.0).with_requires_grad(true);
    let y = x.elu_default()?;
    assert_eq!(y.item()?, 0.0);
    y.backward()?;
    let g: Vec<f32> = x.grad().unwrap().iter().copied().collect();
    assert_relative_eq!(g[0], 1.0, epsilon = 1e-7);
    Ok(())
}

#[test]
fn test_elu_negative_multiplier_closed_form() -> Result<(), FerrogradError> {
    let samples = vec![-0.1, -1.0, -3.0, -20.0, -1000.0];
    let x = Tensor::new(samples.clone(), vec![samples.len()])?.with_requires_grad(true);
    let y = x.elu_default()?;
    assert!(y.to_vec().iter().all(|v| v.is_finite()));
    assert_relative_eq!(y.to_vec()[4], -1.0, epsilon = 1e-6);

    y.sum(None, false)?.backward()?;
    let grad = x.grad().unwrap();
    for (i, &s) in samples.iter().enumerate() {
        let g = grad[[i]];
        assert!(g.is_finite(), "gradient at {} is {}", s, g);
        assert_relative_eq!(g, s.exp(), epsilon = 1e-6);
    }
    Ok(())
}

#[test]
fn test_elu_large_positive_no_overflow() -> Result<(), FerrogradError> {
    let x = Tensor::new(vec![100.0, 1e30], vec![2])?;
    let y = x.elu_default()?;
    assert_eq!(y.to_vec(), vec![100.0, 1e30]);
    Ok(())
}

#[test]
fn test_elu_non_finite_alpha_reported() {
    let x = Tensor::new(vec![-1.0], vec![1]).unwrap();
    let err = x.elu(f32::INFINITY).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Numeric);
}

#[test]
fn test_elu_nan_input_propagates() -> Result<(), FerrogradError> {
    let x = Tensor::new(vec![f32::NAN, 1.0], vec![2])?;
    let y = x.elu_default()?;
    assert!(y.to_vec()[0].is_nan());
    Ok(())
}

#[test]
fn test_elu_grad_check() {
    let x = Tensor::new(vec![-1.5, -0.3, 0.4, 2.0], vec![2, 2])
        .unwrap()
        .with_requires_grad(true);
    let output_grad = ArrayD::from_elem(IxDyn(&[2, 2]), 1.0f32);
    let res = check_grad(|ins| ins[0].elu(1.3), &[x], &output_grad, 1e-2, 1e-3, 1e-2);
    assert!(res.is_ok(), "{:?}", res.err());
}
