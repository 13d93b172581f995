//! Integration tests for the CPU backend through the public API

mod common;

use common::{assert_allclose_f32, create_cpu_client, seeded_data};
use densr::prelude::*;

#[test]
fn test_add_2x2() {
    let (client, _) = create_cpu_client();
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 6.0, 7.0, 8.0];
    let mut out = [0.0f32; 4];
    client
        .add(
            MatrixRef::new(&a, 2, 2).unwrap(),
            MatrixRef::new(&b, 2, 2).unwrap(),
            MatrixMut::new(&mut out, 2, 2).unwrap(),
        )
        .unwrap();
    assert_eq!(out, [6.0, 8.0, 10.0, 12.0]);
}

#[test]
fn test_multiply_2x2() {
    let (client, _) = create_cpu_client();
    let a = [1.0, 2.0, 3.0, 4.0];
    let b = [5.0, 6.0, 7.0, 8.0];
    let mut out = [0.0f32; 4];
    client
        .multiply(
            MatrixRef::new(&a, 2, 2).unwrap(),
            MatrixRef::new(&b, 2, 2).unwrap(),
            MatrixMut::new(&mut out, 2, 2).unwrap(),
        )
        .unwrap();
    assert_eq!(out, [19.0, 22.0, 43.0, 50.0]);
}

#[test]
fn test_multiply_rectangular() {
    let (client, _) = create_cpu_client();
    // [2, 3] @ [3, 1]
    let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let b = [1.0, 0.0, -1.0];
    let mut out = [0.0f32; 2];
    client
        .multiply(
            MatrixRef::new(&a, 2, 3).unwrap(),
            MatrixRef::new(&b, 3, 1).unwrap(),
            MatrixMut::new(&mut out, 2, 1).unwrap(),
        )
        .unwrap();
    assert_eq!(out, [-2.0, -2.0]);
}

#[test]
fn test_scale_and_scale_inplace() {
    let (client, _) = create_cpu_client();
    let a = [1.0, 2.0, 3.0, 4.0];
    let mut out = [0.0f32; 4];
    client
        .scale(
            2.0,
            MatrixRef::new(&a, 2, 2).unwrap(),
            MatrixMut::new(&mut out, 2, 2).unwrap(),
        )
        .unwrap();
    assert_eq!(out, [2.0, 4.0, 6.0, 8.0]);

    client
        .scale_inplace(-0.5, MatrixMut::new(&mut out, 2, 2).unwrap())
        .unwrap();
    assert_eq!(out, [-1.0, -2.0, -3.0, -4.0]);
}

#[test]
fn test_relu_row() {
    let (client, _) = create_cpu_client();
    let a = [-1.0, 0.0, 2.0, -3.0];
    let mut out = [9.0f32; 4];
    client
        .relu(MatrixRef::row(&a), MatrixMut::row(&mut out))
        .unwrap();
    assert_eq!(out, [0.0, 0.0, 2.0, 0.0]);
}

#[test]
fn test_inplace_matches_out_of_place() {
    let (client, _) = create_cpu_client();
    let a = seeded_data(60, 1, -4.0, 4.0);
    let b = seeded_data(60, 2, -4.0, 4.0);

    let mut sum = vec![0.0f32; 60];
    client
        .add(
            MatrixRef::new(&a, 6, 10).unwrap(),
            MatrixRef::new(&b, 6, 10).unwrap(),
            MatrixMut::new(&mut sum, 6, 10).unwrap(),
        )
        .unwrap();
    let mut acc = a.clone();
    client
        .add_inplace(
            MatrixMut::new(&mut acc, 6, 10).unwrap(),
            MatrixRef::new(&b, 6, 10).unwrap(),
        )
        .unwrap();
    assert_eq!(sum, acc);

    let mut diff = vec![0.0f32; 60];
    client
        .sub(
            MatrixRef::new(&a, 6, 10).unwrap(),
            MatrixRef::new(&b, 6, 10).unwrap(),
            MatrixMut::new(&mut diff, 6, 10).unwrap(),
        )
        .unwrap();
    let mut acc = a.clone();
    client
        .sub_inplace(
            MatrixMut::new(&mut acc, 6, 10).unwrap(),
            MatrixRef::new(&b, 6, 10).unwrap(),
        )
        .unwrap();
    assert_eq!(diff, acc);

    check_inplace(&a, |x, o| client.sigmoid(x, o), |x| client.sigmoid_inplace(x));
    check_inplace(&a, |x, o| client.relu(x, o), |x| client.relu_inplace(x));
    check_inplace(
        &a,
        |x, o| client.tanh_activation(x, o),
        |x| client.tanh_activation_inplace(x),
    );
    check_inplace(&a, |x, o| client.softmax(x, o), |x| client.softmax_inplace(x));
}

fn check_inplace(
    a: &[f32],
    op: impl Fn(MatrixRef<'_>, MatrixMut<'_>) -> Result<()>,
    inplace: impl Fn(MatrixMut<'_>) -> Result<()>,
) {
    let mut out = vec![0.0f32; a.len()];
    op(MatrixRef::row(a), MatrixMut::row(&mut out)).unwrap();
    let mut acc = a.to_vec();
    inplace(MatrixMut::row(&mut acc)).unwrap();
    assert_eq!(out, acc);
}

#[test]
fn test_dimension_mismatch_leaves_output() {
    let (client, _) = create_cpu_client();
    let a = [1.0f32; 6];
    let b = [1.0f32; 8];
    let mut out = [7.0f32; 4];
    let err = client
        .multiply(
            MatrixRef::new(&a, 2, 3).unwrap(),
            MatrixRef::new(&b, 4, 2).unwrap(),
            MatrixMut::new(&mut out, 2, 2).unwrap(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            lhs_cols: 3,
            rhs_rows: 4
        }
    ));
    assert_eq!(out, [7.0; 4]);
}

#[test]
fn test_shape_mismatch_leaves_output() {
    let (client, _) = create_cpu_client();
    let a = [1.0f32; 4];
    let b = [1.0f32; 9];
    let mut out = [7.0f32; 4];
    let err = client
        .add(
            MatrixRef::new(&a, 2, 2).unwrap(),
            MatrixRef::new(&b, 3, 3).unwrap(),
            MatrixMut::new(&mut out, 2, 2).unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
    assert_eq!(out, [7.0; 4]);

    // Wrong output shape is also rejected
    let mut small = [7.0f32; 2];
    assert!(
        client
            .sigmoid(
                MatrixRef::new(&a, 2, 2).unwrap(),
                MatrixMut::new(&mut small, 1, 2).unwrap(),
            )
            .is_err()
    );
    assert_eq!(small, [7.0; 2]);
}

#[test]
fn test_matmul_wrong_output_shape() {
    let (client, _) = create_cpu_client();
    let a = [1.0f32; 6];
    let b = [1.0f32; 6];
    let mut out = [0.0f32; 6];
    let err = client
        .multiply(
            MatrixRef::new(&a, 2, 3).unwrap(),
            MatrixRef::new(&b, 3, 2).unwrap(),
            MatrixMut::new(&mut out, 3, 2).unwrap(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}

#[test]
fn test_empty_matrices_are_noops() {
    let (client, _) = create_cpu_client();
    let empty: [f32; 0] = [];
    let mut out: [f32; 0] = [];
    let e = || MatrixRef::new(&empty, 0, 3).unwrap();

    client
        .add(e(), e(), MatrixMut::new(&mut out, 0, 3).unwrap())
        .unwrap();
    client
        .scale(3.0, e(), MatrixMut::new(&mut out, 0, 3).unwrap())
        .unwrap();
    client
        .softmax(e(), MatrixMut::new(&mut out, 0, 3).unwrap())
        .unwrap();
    client
        .softmax_inplace(MatrixMut::new(&mut out, 0, 3).unwrap())
        .unwrap();
}

#[test]
fn test_softmax_uniform_and_shifted() {
    let (client, _) = create_cpu_client();
    let mut out = [0.0f32; 4];
    client
        .softmax(MatrixRef::row(&[3.0; 4]), MatrixMut::row(&mut out))
        .unwrap();
    assert_allclose_f32(&out, &[0.25; 4], 0.0, 1e-7, "uniform softmax");

    // Large inputs stay finite thanks to the max shift
    let big = [1000.0f32, 1001.0, 1002.0];
    let mut out = [0.0f32; 3];
    client
        .softmax(MatrixRef::row(&big), MatrixMut::row(&mut out))
        .unwrap();
    assert!(out.iter().all(|x| x.is_finite()));
    assert_allclose_f32(
        &out,
        &[0.090_030_57, 0.244_728_48, 0.665_240_94],
        1e-5,
        1e-7,
        "shifted softmax",
    );
}

#[test]
fn test_tanh_saturates_without_nan() {
    let (client, _) = create_cpu_client();
    let a = [-1.0e6f32, -50.0, 0.0, 50.0, 1.0e6];
    let mut out = [0.0f32; 5];
    client
        .tanh_activation(MatrixRef::row(&a), MatrixMut::row(&mut out))
        .unwrap();
    assert_eq!(out, [-1.0, -1.0, 0.0, 1.0, 1.0]);
}

#[test]
fn test_large_matmul_matches_naive() {
    let (client, _) = create_cpu_client();
    let (m, k, n) = (70, 65, 90);
    let a = seeded_data(m * k, 3, -1.0, 1.0);
    let b = seeded_data(k * n, 4, -1.0, 1.0);
    let mut out = vec![0.0f32; m * n];
    client
        .multiply(
            MatrixRef::new(&a, m, k).unwrap(),
            MatrixRef::new(&b, k, n).unwrap(),
            MatrixMut::new(&mut out, m, n).unwrap(),
        )
        .unwrap();

    let mut expected = vec![0.0f32; m * n];
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0f32;
            for kk in 0..k {
                sum += a[i * k + kk] * b[kk * n + j];
            }
            expected[i * n + j] = sum;
        }
    }
    // Same accumulation order, so bit-identical
    assert_eq!(out, expected);
}

#[test]
fn test_generic_over_backend() {
    fn hidden_layer<C: MatrixOps>(
        client: &C,
        x: MatrixRef<'_>,
        w: MatrixRef<'_>,
        mut out: MatrixMut<'_>,
    ) -> Result<()> {
        client.multiply(x, w, out.reborrow())?;
        client.relu_inplace(out)
    }

    let (client, _) = create_cpu_client();
    let x = [1.0, -2.0];
    let w = [1.0, 2.0, 3.0, 4.0];
    let mut out = [0.0f32; 2];
    hidden_layer(
        &client,
        MatrixRef::new(&x, 1, 2).unwrap(),
        MatrixRef::new(&w, 2, 2).unwrap(),
        MatrixMut::new(&mut out, 1, 2).unwrap(),
    )
    .unwrap();
    // [1*1 - 2*3, 1*2 - 2*4] = [-5, -6] -> relu
    assert_eq!(out, [0.0, 0.0]);
}

#[test]
fn test_runtime_identity() {
    assert_eq!(CpuRuntime::name(), "cpu");
    assert_eq!(CpuRuntime::kind(), BackendKind::Sequential);
    let (client, device) = create_cpu_client();
    assert!(client.device().is_same(&device));
    client.synchronize().unwrap();
}
