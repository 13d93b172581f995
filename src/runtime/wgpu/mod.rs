//! WebGPU runtime implementation (requires `wgpu` feature)
//!
//! Cross-platform GPU backend on top of WebGPU (Vulkan, Metal, DX12, GL).
//!
//! | Concept          | wgpu object        |
//! |------------------|--------------------|
//! | platform         | `wgpu::Instance`   |
//! | device handle    | `wgpu::Adapter`    |
//! | execution context| `wgpu::Device`     |
//! | command queue    | `wgpu::Queue`      |
//! | program / kernel | shader module / compute pipeline |
//!
//! All of these are owned by one [`WgpuClient`].

mod buffer;
mod client;
mod config;
mod device;
pub(crate) mod ops;
mod runtime;
pub mod shaders;

pub use buffer::{BufferAccess, DeviceBuffer};
pub use client::{ContextState, WgpuClient};
pub use config::ContextConfig;
pub use device::{AdapterInfo, WgpuDevice};
pub use runtime::{WgpuRuntime, is_wgpu_available};
pub use shaders::{KernelCacheStats, KernelId};
