//! WGSL shader source code for matrix multiplication
//!
//! One invocation per output element; each sums over the shared dimension in
//! ascending order. No cross-invocation partial sums.

/// Matrix multiplication shader module source (F32 only)
pub const MATMUL_SHADER: &str = r#"
struct MatmulParams {
    M: u32,     // Rows of A and C
    K: u32,     // Cols of A, Rows of B
    N: u32,     // Cols of B and C
    _pad0: u32,
}

@group(0) @binding(0) var<storage, read> matmul_a: array<f32>;
@group(0) @binding(1) var<storage, read> matmul_b: array<f32>;
@group(0) @binding(2) var<storage, read_write> matmul_c: array<f32>;
@group(0) @binding(3) var<uniform> matmul_params: MatmulParams;

// x indexes columns of C, y indexes rows of C
@compute @workgroup_size(16, 16, 1)
fn matmul(@builtin(global_invocation_id) global_id: vec3<u32>) {
    let M = matmul_params.M;
    let K = matmul_params.K;
    let N = matmul_params.N;

    let row = global_id.y;
    let col = global_id.x;

    if (row >= M || col >= N) {
        return;
    }

    var sum: f32 = 0.0;
    for (var k: u32 = 0u; k < K; k = k + 1u) {
        sum = sum + matmul_a[row * K + k] * matmul_b[k * N + col];
    }

    matmul_c[row * N + col] = sum;
}
"#;
