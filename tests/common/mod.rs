//! Common test utilities
#![allow(dead_code)]

use densr::runtime::Runtime;
use densr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
#[cfg(feature = "wgpu")]
use densr::runtime::wgpu::{ContextConfig, WgpuClient};
#[cfg(feature = "wgpu")]
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device).expect("CPU client is infallible");
    (client, device)
}

/// Install a test-writer subscriber once; `RUST_LOG=densr=trace` shows dispatches
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Assert two f32 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Deterministic values in `[lo, hi)` (xorshift, no extra dependency)
pub fn seeded_data(n: usize, seed: u64, lo: f32, hi: f32) -> Vec<f32> {
    let mut state = seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) | 1;
    (0..n)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let unit = (state >> 40) as f32 / (1u64 << 24) as f32;
            lo + unit * (hi - lo)
        })
        .collect()
}

/// Create a WebGPU compute context, returning None if no adapter is usable.
///
/// Software adapters are accepted so CI machines with lavapipe/WARP run the
/// GPU suites too.
#[cfg(feature = "wgpu")]
pub fn create_wgpu_client() -> Option<WgpuClient> {
    match WgpuClient::acquire(ContextConfig::default().allow_software(true)) {
        Ok(client) => Some(client),
        Err(e) => {
            println!("No GPU available, skipping test: {}", e);
            None
        }
    }
}

#[cfg(feature = "wgpu")]
static WGPU_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Serialize GPU tests within one test binary
#[cfg(feature = "wgpu")]
pub fn wgpu_lock() -> MutexGuard<'static, ()> {
    WGPU_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
