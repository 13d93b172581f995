//! WGSL compute shaders for WebGPU operations
//!
//! - `*_wgsl.rs`: shader sources as `&'static str`
//! - [`kernel`]: the static registry mapping [`KernelId`] to source, entry
//!   point and bindings
//! - [`pipeline`]: the [`KernelCache`] and dispatch helpers
//! - `elementwise`, `matmul`, `softmax`: launchers recording dispatches

pub mod elementwise_wgsl;
pub mod kernel;
pub mod matmul_wgsl;
pub mod pipeline;
pub mod softmax_wgsl;

pub(crate) mod elementwise;
pub(crate) mod matmul;
pub(crate) mod softmax;

pub(crate) use elementwise::launch_elementwise;
pub use kernel::{BindingKind, KernelId, Program};
pub(crate) use matmul::launch_matmul;
pub use pipeline::{
    KernelCache, KernelCacheStats, MATMUL_TILE, ProgramCacheEntry, WORKGROUP_SIZE,
    elementwise_grid,
};
pub(crate) use softmax::launch_softmax;
