//! # densr
//!
//! **Dense `f32` matrix arithmetic and activations behind one contract, on CPU
//! and WebGPU.**
//!
//! densr exposes a small set of operations on row-major matrices (add,
//! subtract, scale, multiply, sigmoid, relu, tanh, softmax) as traits. Each
//! backend implements those traits on its client type, so code written against
//! the traits runs unchanged on either backend.
//!
//! ## Backends
//!
//! - **CPU** (always available): nested loops on the host. It is the
//!   reference oracle; with `rayon` large inputs fan out over threads.
//! - **WebGPU** (`wgpu` feature): a compute context owning one device and
//!   queue, with WGSL kernels compiled on first use and cached.
//!
//! ## Quick Start
//!
//! ```rust
//! use densr::prelude::*;
//!
//! let client = CpuRuntime::default_client(&CpuDevice::new())?;
//!
//! let a = [1.0f32, 2.0, 3.0, 4.0];
//! let b = [5.0f32, 6.0, 7.0, 8.0];
//! let mut c = [0.0f32; 4];
//!
//! client.multiply(
//!     MatrixRef::new(&a, 2, 2)?,
//!     MatrixRef::new(&b, 2, 2)?,
//!     MatrixMut::new(&mut c, 2, 2)?,
//! )?;
//! assert_eq!(c, [19.0, 22.0, 43.0, 50.0]);
//! # Ok::<(), densr::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): CPU backend
//! - `rayon` (default): Multi-threaded CPU operations
//! - `wgpu`: Cross-platform GPU via WebGPU

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod error;
pub mod matrix;
pub mod ops;
pub mod runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::matrix::{MatrixMut, MatrixRef, Shape};
    pub use crate::ops::{ActivationOps, ArithmeticOps, MatmulOps, MatrixOps};
    pub use crate::runtime::{BackendKind, Device, Runtime, RuntimeClient};

    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};

    #[cfg(feature = "wgpu")]
    pub use crate::runtime::wgpu::{ContextConfig, WgpuClient, WgpuDevice, WgpuRuntime};
}

/// Default runtime based on enabled features
///
/// - With `wgpu` feature: `WgpuRuntime`
/// - Otherwise: `CpuRuntime`
#[cfg(feature = "wgpu")]
pub type DefaultRuntime = runtime::wgpu::WgpuRuntime;

/// Default runtime based on enabled features
#[cfg(not(feature = "wgpu"))]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
