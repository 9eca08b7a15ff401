use super::*;
use crate::tensor::Tensor;
use std::panic;

#[test]
fn test_default_is_enabled() {
    assert!(is_grad_enabled());
}

#[test]
fn test_nested_scopes_restore_previous_mode() {
    let outer = no_grad();
    assert!(!is_grad_enabled());
    {
        let _inner = enable_grad();
        assert!(is_grad_enabled());
        {
            let _innermost = no_grad();
            assert!(!is_grad_enabled());
        }
        assert!(is_grad_enabled());
    }
    assert!(!is_grad_enabled());
    drop(outer);
    assert!(is_grad_enabled());
}

#[test]
fn test_restored_after_panic() {
    let result = panic::catch_unwind(|| {
        let _guard = no_grad();
        assert!(!is_grad_enabled());
        panic!("boom");
    });
    assert!(result.is_err());
    assert!(is_grad_enabled());
}

#[test]
fn test_no_graph_recorded_under_no_grad() {
    let x = Tensor::new(vec![1.0, -2.0], vec![2]).unwrap().with_requires_grad(true);
    let y = with_no_grad(|| x.mul_scalar(3.0).unwrap());
    assert!(!y.requires_grad());
    assert!(y.grad_fn().is_none());

    let z = x.mul_scalar(3.0).unwrap();
    assert!(z.requires_grad());
    assert!(z.grad_fn().is_some());
}

#[test]
fn test_mode_is_thread_local() {
    let _guard = no_grad();
    let other = std::thread::spawn(is_grad_enabled).join().unwrap();
    assert!(other);
    assert!(!is_grad_enabled());
}

#[test]
fn test_out_of_order_drop_keeps_inner_scope() {
    let outer = enable_grad();
    let inner = no_grad();
    drop(outer);
    assert!(!is_grad_enabled());

    let x = Tensor::new(vec![1.0], vec![1]).unwrap().with_requires_grad(true);
    assert!(x.mul_scalar(2.0).unwrap().grad_fn().is_none());

    drop(inner);
    assert!(is_grad_enabled());
}
