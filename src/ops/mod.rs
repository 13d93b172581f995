//! Matrix operations
//!
//! This module defines the operation contract every backend satisfies and
//! the backend implementations of it.
//!
//! # Design
//!
//! Operations are traits implemented by the runtime client. A client is the
//! handle a caller acquires for a backend: `CpuClient` for the sequential
//! backend, `WgpuClient` (the compute context) for the accelerator.
//!
//! ```text
//! Client
//!   ├── ArithmeticOps   add, sub, scale (+ in-place variants)
//!   ├── MatmulOps       multiply
//!   └── ActivationOps   sigmoid, relu, tanh_activation, softmax (+ in-place)
//! ```
//!
//! # Calling Convention
//!
//! - Inputs are borrowed [`MatrixRef`](crate::matrix::MatrixRef) views.
//! - Out-of-place operations write into a caller-allocated
//!   [`MatrixMut`](crate::matrix::MatrixMut); the contract never allocates
//!   host memory for the caller.
//! - `*_inplace` variants mutate their first operand and nothing else.
//! - Shapes are validated before any work is done. On failure the output
//!   buffer is left untouched.
//! - Empty matrices are a valid no-op.
//!
//! # Backend-generic code
//!
//! ```
//! use densr::prelude::*;
//!
//! fn affine<C: MatrixOps>(client: &C, x: MatrixRef<'_>, w: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()> {
//!     client.multiply(x, w, out)
//! }
//!
//! let client = CpuRuntime::default_client(&CpuDevice::new()).unwrap();
//! let x = [1.0f32, 2.0];
//! let w = [3.0f32, 4.0];
//! let mut y = [0.0f32; 1];
//! affine(
//!     &client,
//!     MatrixRef::new(&x, 1, 2).unwrap(),
//!     MatrixRef::new(&w, 2, 1).unwrap(),
//!     MatrixMut::new(&mut y, 1, 1).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(y, [11.0]);
//! ```

pub(crate) mod common;
mod cpu;
#[cfg(feature = "wgpu")]
mod wgpu;

pub mod traits;

pub use common::TANH_CLAMP;
pub use traits::{ActivationOps, ArithmeticOps, MatmulOps, MatrixOps};
