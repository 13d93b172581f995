//! CPU runtime implementation
//!
//! The CPU runtime is the sequential reference implementation of the
//! operation contract and the oracle other backends are validated against.
//! It has no shared mutable state beyond caller-supplied buffers, so a
//! `CpuClient` is freely cloneable and reentrant.
//!
//! # Parallelism
//!
//! Rows of an elementwise operation and rows of a matrix product are
//! independent. With the `rayon` feature, inputs of at least
//! [`PARALLEL_THRESHOLD`] elements fan out over worker threads. Every output
//! element is computed with the same arithmetic in both paths, so results do
//! not depend on the feature.

mod client;
mod device;
pub(crate) mod kernels;
mod runtime;

pub use client::CpuClient;
pub use device::CpuDevice;
pub use kernels::PARALLEL_THRESHOLD;
pub use runtime::CpuRuntime;
