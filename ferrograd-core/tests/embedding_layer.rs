use ferrograd_core::nn::{Embedding, MSELoss, Module};
use ferrograd_core::utils::testing::{check_array_near, check_tensor_near};
use ferrograd_core::{ErrorKind, Tensor};

mod common;
use common::{grad_leaf, leaf};

fn table() -> Tensor {
    leaf(
        vec![0.0, 0.1, 1.0, 1.1, 2.0, 2.1, 3.0, 3.1],
        vec![4, 2],
    )
}

#[test]
fn test_lookup_output_shape() {
    let emb = Embedding::from_pretrained(&table(), false).unwrap();
    let idx = leaf(vec![3.0, 0.0, 1.0, 1.0], vec![2, 2]);
    let out = emb.forward(&idx).unwrap();
    check_tensor_near(
        &out,
        &[2, 2, 2],
        &[3.0, 3.1, 0.0, 0.1, 1.0, 1.1, 1.0, 1.1],
        1e-6,
    );
    let single = emb.forward(&Tensor::scalar(2.0)).unwrap();
    check_tensor_near(&single, &[2], &[2.0, 2.1], 1e-6);
}

#[test]
fn test_frozen_gradient_is_full_shape_zeros() {
    let caller_weight = grad_leaf(table().to_vec(), vec![4, 2]);
    let emb = Embedding::from_pretrained(&caller_weight, true).unwrap();
    assert!(!emb.weight().requires_grad());
    assert!(caller_weight.requires_grad());

    let x = grad_leaf(vec![1.0, 1.0], vec![2]);
    let out = emb.forward(&leaf(vec![0.0, 2.0], vec![2])).unwrap().mul(&x).unwrap();
    out.sum(None, false).unwrap().backward().unwrap();

    let grad = emb.weight_grad();
    check_array_near(&grad, &[4, 2], &[0.0; 8], 0.0);
    assert!(caller_weight.grad().is_none());
}

#[test]
fn test_unfrozen_rows_accumulate() {
    let emb = Embedding::from_pretrained(&table(), false).unwrap();
    emb.forward(&leaf(vec![0.0, 2.0], vec![2]))
        .unwrap()
        .sum(None, false)
        .unwrap()
        .backward()
        .unwrap();
    check_array_near(
        &emb.weight_grad(),
        &[4, 2],
        &[1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0],
        0.0,
    );
}

#[test]
fn test_repeated_index_within_one_call_sums() {
    let emb = Embedding::from_pretrained(&table(), false).unwrap();
    emb.forward(&leaf(vec![1.0, 3.0, 1.0, 1.0], vec![4]))
        .unwrap()
        .sum(None, false)
        .unwrap()
        .backward()
        .unwrap();
    check_array_near(
        &emb.weight_grad(),
        &[4, 2],
        &[0.0, 0.0, 3.0, 3.0, 0.0, 0.0, 1.0, 1.0],
        0.0,
    );
}

#[test]
fn test_bad_indices_are_index_errors() {
    let emb = Embedding::from_pretrained(&table(), false).unwrap();
    for bad in [4.0, -1.0, 1.5] {
        let err = emb.forward(&leaf(vec![bad], vec![1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Index);
    }
}

#[test]
fn test_embedding_trained_through_mse() {
    let emb = Embedding::from_pretrained(&table(), false).unwrap();
    let out = emb.forward(&leaf(vec![1.0], vec![1])).unwrap();
    let target = leaf(vec![2.0, 1.1], vec![1, 2]);
    let loss = MSELoss::default().forward(&out, &target).unwrap();
    loss.backward().unwrap();
    // d/dw mean((w - t)^2) = 2 (w - t) / 2
    check_array_near(
        &emb.weight_grad(),
        &[4, 2],
        &[0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        1e-6,
    );
    emb.zero_grad();
    check_array_near(&emb.weight_grad(), &[4, 2], &[0.0; 8], 0.0);
}
