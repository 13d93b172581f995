//! Shared helpers for backend parity tests: assertion utilities, backend lock, client creation.

use densr::runtime::wgpu::WgpuClient;

use crate::common::{create_wgpu_client, wgpu_lock};

/// Shapes exercised by every elementwise parity test: single elements,
/// odd sizes that straddle a workgroup and sizes spanning many workgroups.
pub const SHAPES: &[(usize, usize)] = &[(1, 1), (1, 7), (3, 5), (16, 16), (17, 33), (64, 300)];

/// Compare an accelerator result to the CPU oracle.
///
/// The tolerance covers differing `exp` precision on devices and the
/// cancellation in the tanh formula near zero.
pub fn assert_parity_f32(cpu: &[f32], backend: &[f32], op: &str) {
    let rtol = 1e-4f32;
    let atol = 1e-5f32;
    assert_eq!(
        cpu.len(),
        backend.len(),
        "parity_f32[{}]: length mismatch: {} vs {}",
        op,
        cpu.len(),
        backend.len()
    );

    for (i, (x, y)) in backend.iter().zip(cpu.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();

        if diff.is_nan() || diff > tol {
            panic!(
                "parity_f32[{}] at index {}: {} vs {} (diff={}, tol={})",
                op, i, x, y, diff, tol
            );
        }
    }
}

/// Run `f` with an exclusive WebGPU context, skipping when none is available
pub fn with_wgpu_backend<F>(mut f: F)
where
    F: FnMut(&WgpuClient),
{
    let _guard = wgpu_lock();
    let Some(client) = create_wgpu_client() else {
        return;
    };
    f(&client);
}
