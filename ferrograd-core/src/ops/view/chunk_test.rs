use super::chunk_ranges;
use crate::error::FerrogradError;
use crate::tensor::{arange, Tensor};
use crate::utils::testing::{check_array_near, check_tensor_near};

#[test]
fn test_chunk_ranges_remainder_goes_to_leading_chunks() {
    let lens: Vec<usize> = chunk_ranges(11, 6).into_iter().map(|r| r.len()).collect();
    assert_eq!(lens, vec![2, 2, 2, 2, 2, 1]);
    let lens: Vec<usize> = chunk_ranges(12, 2).into_iter().map(|r| r.len()).collect();
    assert_eq!(lens, vec![6, 6]);
    let lens: Vec<usize> = chunk_ranges(2, 4).into_iter().map(|r| r.len()).collect();
    assert_eq!(lens, vec![1, 1, 0, 0]);
}

#[test]
fn test_chunk_twelve_into_two() {
    let t = arange(12);
    let chunks = t.chunk(2, 0).unwrap();
    assert_eq!(chunks.len(), 2);
    check_tensor_near(&chunks[0], &[6], &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 1e-6);
    check_tensor_near(&chunks[1], &[6], &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0], 1e-6);
}

#[test]
fn test_chunk_eleven_into_six_and_single_chunk_backward() {
    let x = arange(11).with_requires_grad(true);
    let chunks = x.chunk(6, 0).unwrap();
    let sizes: Vec<usize> = chunks.iter().map(|c| c.numel()).collect();
    assert_eq!(sizes, vec![2, 2, 2, 2, 2, 1]);
    check_tensor_near(&chunks[5], &[1], &[10.0], 1e-6);

    chunks[2].sum(None, false).unwrap().backward().unwrap();
    let mut expected = vec![0.0; 11];
    expected[4] = 1.0;
    expected[5] = 1.0;
    check_array_near(&x.grad().unwrap(), &[11], &expected, 1e-6);
}

#[test]
fn test_chunk_zero_rejected() {
    let t = Tensor::new(vec![1.0, 2.0], vec![2]).unwrap();
    let err = t.chunk(0, 0).unwrap_err();
    assert!(matches!(err, FerrogradError::InvalidPartition { length: 2, .. }));
}

#[test]
fn test_chunk_along_axis1() {
    let t = arange(6).reshape(&[2, 3]).unwrap();
    let chunks = t.chunk(2, 1).unwrap();
    check_tensor_near(&chunks[0], &[2, 2], &[0.0, 1.0, 3.0, 4.0], 1e-6);
    check_tensor_near(&chunks[1], &[2, 1], &[2.0, 5.0], 1e-6);
}
