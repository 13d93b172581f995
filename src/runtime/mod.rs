//! Runtime backends for matrix computation
//!
//! This module defines the `Runtime` trait and provides implementations
//! for the two compute backends (sequential CPU, WebGPU accelerator).
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity, chosen at composition time)
//! ├── Device (identifies the CPU or a specific GPU adapter)
//! └── Client (dispatches operations; for wgpu this is the compute context)
//! ```

pub mod cpu;

#[cfg(feature = "wgpu")]
pub mod wgpu;

mod traits;

pub use traits::{BackendKind, Device, Runtime, RuntimeClient};
