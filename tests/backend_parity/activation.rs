// Backend parity tests for ActivationOps
//
// Covers sigmoid, relu, tanh_activation and softmax, out-of-place and
// in-place, plus the two-phase softmax reduction on sizes larger than one
// workgroup.

use densr::prelude::*;

use crate::common::{create_cpu_client, seeded_data};
use crate::helpers::{SHAPES, assert_parity_f32, with_wgpu_backend};

#[derive(Clone, Copy, Debug)]
enum Activation {
    Sigmoid,
    Relu,
    Tanh,
    Softmax,
}

const ALL: [Activation; 4] = [
    Activation::Sigmoid,
    Activation::Relu,
    Activation::Tanh,
    Activation::Softmax,
];

fn run<C: ActivationOps>(client: &C, act: Activation, a: &[f32], rows: usize, cols: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; rows * cols];
    let a = MatrixRef::new(a, rows, cols).unwrap();
    let o = MatrixMut::new(&mut out, rows, cols).unwrap();
    let result = match act {
        Activation::Sigmoid => client.sigmoid(a, o),
        Activation::Relu => client.relu(a, o),
        Activation::Tanh => client.tanh_activation(a, o),
        Activation::Softmax => client.softmax(a, o),
    };
    result.unwrap_or_else(|e| panic!("{act:?} failed: {e}"));
    out
}

fn run_inplace<C: ActivationOps>(
    client: &C,
    act: Activation,
    a: &[f32],
    rows: usize,
    cols: usize,
) -> Vec<f32> {
    let mut acc = a.to_vec();
    let v = MatrixMut::new(&mut acc, rows, cols).unwrap();
    let result = match act {
        Activation::Sigmoid => client.sigmoid_inplace(v),
        Activation::Relu => client.relu_inplace(v),
        Activation::Tanh => client.tanh_activation_inplace(v),
        Activation::Softmax => client.softmax_inplace(v),
    };
    result.unwrap_or_else(|e| panic!("{act:?}_inplace failed: {e}"));
    acc
}

#[test]
fn test_activation_parity() {
    let (cpu, _) = create_cpu_client();
    with_wgpu_backend(|gpu| {
        for (idx, &(rows, cols)) in SHAPES.iter().enumerate() {
            let a = seeded_data(rows * cols, idx as u64 + 11, -8.0, 8.0);
            for act in ALL {
                let name = format!("{act:?}_{rows}x{cols}");
                let expected = run(&cpu, act, &a, rows, cols);
                assert_parity_f32(&expected, &run(gpu, act, &a, rows, cols), &name);
                assert_parity_f32(
                    &expected,
                    &run_inplace(gpu, act, &a, rows, cols),
                    &format!("{name}_inplace"),
                );
            }
        }
    });
}

#[test]
fn test_relu_row_exact() {
    with_wgpu_backend(|gpu| {
        let got = run(gpu, Activation::Relu, &[-1.0, 0.0, 2.0, -3.0], 1, 4);
        assert_eq!(got, [0.0, 0.0, 2.0, 0.0]);
    });
}

#[test]
fn test_tanh_saturation_parity() {
    let (cpu, _) = create_cpu_client();
    with_wgpu_backend(|gpu| {
        let a = [-1.0e6f32, -100.0, -20.0, -1.0e-3, 0.0, 1.0e-3, 20.0, 100.0, 1.0e6];
        let expected = run(&cpu, Activation::Tanh, &a, 1, a.len());
        let got = run(gpu, Activation::Tanh, &a, 1, a.len());
        assert!(got.iter().all(|x| x.is_finite()));
        assert_parity_f32(&expected, &got, "tanh_saturation");
    });
}

#[test]
fn test_softmax_large_inputs_stay_finite() {
    with_wgpu_backend(|gpu| {
        let a = [1000.0f32, 1001.0, 1002.0];
        let got = run(gpu, Activation::Softmax, &a, 1, 3);
        assert!(got.iter().all(|x| x.is_finite()));
        assert_parity_f32(&[0.090_030_57, 0.244_728_48, 0.665_240_94], &got, "softmax_shifted");
    });
}

#[test]
fn test_softmax_many_workgroups() {
    let (cpu, _) = create_cpu_client();
    with_wgpu_backend(|gpu| {
        // Larger than one 256-wide workgroup stride several times over
        let (rows, cols) = (37, 211);
        let a = seeded_data(rows * cols, 99, -5.0, 5.0);
        let expected = run(&cpu, Activation::Softmax, &a, rows, cols);
        let got = run(gpu, Activation::Softmax, &a, rows, cols);
        assert_parity_f32(&expected, &got, "softmax_many_workgroups");

        let total: f64 = got.iter().map(|&x| x as f64).sum();
        assert!((total - 1.0).abs() < 1e-4, "sum = {total}");
    });
}
