// Backend parity tests for MatmulOps
//
// The device kernel sums each output element over the shared dimension in
// ascending order, like the CPU backend; remaining differences come from
// fused multiply-add on some devices.

use densr::prelude::*;

use crate::common::{create_cpu_client, seeded_data};
use crate::helpers::{assert_parity_f32, with_wgpu_backend};

struct MatmulTest {
    m: usize,
    k: usize,
    n: usize,
}

impl MatmulTest {
    fn new(m: usize, k: usize, n: usize) -> Self {
        MatmulTest { m, k, n }
    }
}

fn run_matmul<C: MatmulOps>(client: &C, tc: &MatmulTest, a: &[f32], b: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0f32; tc.m * tc.n];
    client
        .multiply(
            MatrixRef::new(a, tc.m, tc.k).unwrap(),
            MatrixRef::new(b, tc.k, tc.n).unwrap(),
            MatrixMut::new(&mut out, tc.m, tc.n).unwrap(),
        )
        .expect("matmul failed");
    out
}

fn test_matmul_parity(test_cases: Vec<MatmulTest>) {
    let (cpu, _) = create_cpu_client();
    with_wgpu_backend(|gpu| {
        for (idx, tc) in test_cases.iter().enumerate() {
            let a = seeded_data(tc.m * tc.k, idx as u64 * 2 + 1, -1.0, 1.0);
            let b = seeded_data(tc.k * tc.n, idx as u64 * 2 + 2, -1.0, 1.0);
            let expected = run_matmul(&cpu, tc, &a, &b);
            let got = run_matmul(gpu, tc, &a, &b);
            // Sums of k products near zero need an absolute floor
            let atol = 1e-6 * tc.k as f32;
            for (i, (x, y)) in got.iter().zip(&expected).enumerate() {
                assert!(
                    (x - y).abs() <= atol + 1e-4 * y.abs(),
                    "matmul_case_{idx} ({}x{}x{}) at {i}: {x} vs {y}",
                    tc.m,
                    tc.k,
                    tc.n
                );
            }
        }
    });
}

#[test]
fn test_matmul_2x2_exact() {
    with_wgpu_backend(|gpu| {
        let tc = MatmulTest::new(2, 2, 2);
        let got = run_matmul(gpu, &tc, &[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0]);
        assert_eq!(got, [19.0, 22.0, 43.0, 50.0]);
    });
}

#[test]
fn test_matmul_small_shapes() {
    test_matmul_parity(vec![
        MatmulTest::new(1, 1, 1),
        MatmulTest::new(1, 5, 1),
        MatmulTest::new(2, 3, 4),
        MatmulTest::new(3, 1, 7),
    ]);
}

#[test]
fn test_matmul_tile_boundaries() {
    // Sizes on either side of the 16x16 workgroup edge
    test_matmul_parity(vec![
        MatmulTest::new(15, 16, 17),
        MatmulTest::new(16, 16, 16),
        MatmulTest::new(17, 31, 33),
        MatmulTest::new(33, 8, 1),
    ]);
}

#[test]
fn test_matmul_larger() {
    test_matmul_parity(vec![
        MatmulTest::new(64, 48, 80),
        MatmulTest::new(128, 128, 128),
    ]);
}

#[test]
fn test_matmul_identity_exact() {
    with_wgpu_backend(|gpu| {
        let n = 19;
        let a = seeded_data(n * n, 42, -10.0, 10.0);
        let mut eye = vec![0.0f32; n * n];
        for i in 0..n {
            eye[i * n + i] = 1.0;
        }
        let got = run_matmul(gpu, &MatmulTest::new(n, n, n), &a, &eye);
        assert_parity_f32(&a, &got, "matmul_identity");
    });
}
