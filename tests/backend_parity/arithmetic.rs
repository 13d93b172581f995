// Backend parity tests for ArithmeticOps
//
// add, sub, scale and their in-place variants must match the CPU backend.

use densr::prelude::*;

use crate::common::{create_cpu_client, seeded_data};
use crate::helpers::{SHAPES, assert_parity_f32, with_wgpu_backend};

#[derive(Clone, Copy, Debug)]
enum BinaryOp {
    Add,
    Sub,
}

fn run_binary<C: ArithmeticOps>(
    client: &C,
    op: BinaryOp,
    a: &[f32],
    b: &[f32],
    rows: usize,
    cols: usize,
) -> Vec<f32> {
    let mut out = vec![0.0f32; rows * cols];
    let a = MatrixRef::new(a, rows, cols).unwrap();
    let b = MatrixRef::new(b, rows, cols).unwrap();
    let out_view = MatrixMut::new(&mut out, rows, cols).unwrap();
    let result = match op {
        BinaryOp::Add => client.add(a, b, out_view),
        BinaryOp::Sub => client.sub(a, b, out_view),
    };
    result.unwrap_or_else(|e| panic!("{op:?} failed: {e}"));
    out
}

fn run_binary_inplace<C: ArithmeticOps>(
    client: &C,
    op: BinaryOp,
    a: &[f32],
    b: &[f32],
    rows: usize,
    cols: usize,
) -> Vec<f32> {
    let mut acc = a.to_vec();
    let acc_view = MatrixMut::new(&mut acc, rows, cols).unwrap();
    let b = MatrixRef::new(b, rows, cols).unwrap();
    let result = match op {
        BinaryOp::Add => client.add_inplace(acc_view, b),
        BinaryOp::Sub => client.sub_inplace(acc_view, b),
    };
    result.unwrap_or_else(|e| panic!("{op:?}_inplace failed: {e}"));
    acc
}

#[test]
fn test_binary_parity() {
    let (cpu, _) = create_cpu_client();
    with_wgpu_backend(|gpu| {
        for (idx, &(rows, cols)) in SHAPES.iter().enumerate() {
            let a = seeded_data(rows * cols, idx as u64 + 1, -100.0, 100.0);
            let b = seeded_data(rows * cols, idx as u64 + 101, -100.0, 100.0);
            for op in [BinaryOp::Add, BinaryOp::Sub] {
                let name = format!("{op:?}_{rows}x{cols}");
                let expected = run_binary(&cpu, op, &a, &b, rows, cols);
                let got = run_binary(gpu, op, &a, &b, rows, cols);
                assert_parity_f32(&expected, &got, &name);

                let got = run_binary_inplace(gpu, op, &a, &b, rows, cols);
                assert_parity_f32(&expected, &got, &format!("{name}_inplace"));
            }
        }
    });
}

#[test]
fn test_add_2x2_exact() {
    with_wgpu_backend(|gpu| {
        let got = run_binary(
            gpu,
            BinaryOp::Add,
            &[1.0, 2.0, 3.0, 4.0],
            &[5.0, 6.0, 7.0, 8.0],
            2,
            2,
        );
        assert_eq!(got, [6.0, 8.0, 10.0, 12.0]);
    });
}

#[test]
fn test_scale_parity() {
    let (cpu, _) = create_cpu_client();
    with_wgpu_backend(|gpu| {
        for (idx, &(rows, cols)) in SHAPES.iter().enumerate() {
            let a = seeded_data(rows * cols, idx as u64 + 7, -50.0, 50.0);
            for scalar in [0.0f32, 1.0, -2.5, 1.0e-3] {
                let name = format!("scale({scalar})_{rows}x{cols}");

                let mut expected = vec![0.0f32; rows * cols];
                cpu.scale(
                    scalar,
                    MatrixRef::new(&a, rows, cols).unwrap(),
                    MatrixMut::new(&mut expected, rows, cols).unwrap(),
                )
                .unwrap();

                let mut got = vec![0.0f32; rows * cols];
                gpu.scale(
                    scalar,
                    MatrixRef::new(&a, rows, cols).unwrap(),
                    MatrixMut::new(&mut got, rows, cols).unwrap(),
                )
                .unwrap();
                assert_parity_f32(&expected, &got, &name);

                let mut acc = a.clone();
                gpu.scale_inplace(scalar, MatrixMut::new(&mut acc, rows, cols).unwrap())
                    .unwrap();
                assert_parity_f32(&expected, &acc, &format!("{name}_inplace"));
            }
        }
    });
}

#[test]
fn test_inplace_leaves_other_operand() {
    with_wgpu_backend(|gpu| {
        let mut a = [1.0f32, 2.0, 3.0, 4.0];
        let b = [0.5f32; 4];
        gpu.sub_inplace(
            MatrixMut::new(&mut a, 2, 2).unwrap(),
            MatrixRef::new(&b, 2, 2).unwrap(),
        )
        .unwrap();
        assert_eq!(a, [0.5, 1.5, 2.5, 3.5]);
        assert_eq!(b, [0.5; 4]);
    });
}
