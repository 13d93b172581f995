//! WebGPU device implementation.
//!
//! `WgpuDevice` identifies an adapter and, once a context has been acquired
//! on it, carries the adapter's metadata.

use std::fmt;
use std::sync::Arc;
use wgpu::{Adapter, Backend, DeviceType, Instance, InstanceDescriptor, Limits};

use super::ContextConfig;
use crate::error::{Error, Result};

/// Cached adapter information for a WebGPU device.
#[derive(Clone, Debug)]
pub struct AdapterInfo {
    /// Adapter name (e.g., "NVIDIA GeForce RTX 4090")
    pub name: String,
    /// Backend type (Vulkan, Metal, DX12, etc.)
    pub backend: Backend,
    /// Adapter class
    pub device_type: DeviceType,
    /// Device limits
    pub limits: Limits,
}

/// WebGPU device identifier.
///
/// The index counts adapters that pass selection (GPU-class, or any class
/// when software adapters are allowed), in enumeration order.
#[derive(Clone)]
pub struct WgpuDevice {
    /// Device index among eligible adapters
    pub(crate) index: usize,
    /// Adapter info, populated on acquire
    info: Option<Arc<AdapterInfo>>,
}

impl WgpuDevice {
    /// Create a device identifier for the specified adapter index.
    ///
    /// This does not touch the GPU; that happens on acquire.
    pub fn new(index: usize) -> Self {
        Self { index, info: None }
    }

    pub(crate) fn with_info(index: usize, info: Arc<AdapterInfo>) -> Self {
        Self {
            index,
            info: Some(info),
        }
    }

    /// Adapter metadata, `None` before acquire
    pub fn info(&self) -> Option<&AdapterInfo> {
        self.info.as_deref()
    }

    /// Get the adapter name.
    ///
    /// Returns "unknown" if the device hasn't been initialized yet.
    pub fn adapter_name(&self) -> String {
        self.info
            .as_ref()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Get the backend type (Vulkan, Metal, DX12, etc.).
    pub fn backend(&self) -> Option<Backend> {
        self.info.as_ref().map(|i| i.backend)
    }

    /// Get the adapter class.
    pub fn device_type(&self) -> Option<DeviceType> {
        self.info.as_ref().map(|i| i.device_type)
    }

    /// Get device limits.
    ///
    /// Returns default limits if the device hasn't been initialized yet.
    pub fn limits(&self) -> Limits {
        self.info
            .as_ref()
            .map(|i| i.limits.clone())
            .unwrap_or_default()
    }

    /// Largest f32 buffer, in bytes, an operation may allocate.
    ///
    /// The smaller of the storage binding and buffer size limits.
    pub fn max_storage_buffer_size(&self) -> u64 {
        let limits = self.limits();
        (limits.max_storage_buffer_binding_size as u64).min(limits.max_buffer_size)
    }
}

impl crate::runtime::Device for WgpuDevice {
    fn id(&self) -> usize {
        self.index
    }

    fn name(&self) -> String {
        format!("wgpu:{}", self.index)
    }
}

impl fmt::Debug for WgpuDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WgpuDevice")
            .field("index", &self.index)
            .field("adapter", &self.adapter_name())
            .field("backend", &self.backend())
            .finish()
    }
}

// ============================================================================
// Adapter Discovery
// ============================================================================

/// Whether an adapter class counts as an accelerator
pub(crate) fn is_gpu_class(device_type: DeviceType) -> bool {
    matches!(
        device_type,
        DeviceType::DiscreteGpu | DeviceType::IntegratedGpu | DeviceType::VirtualGpu
    )
}

/// Create an instance that only initializes the configured backends
pub(crate) fn create_instance(config: &ContextConfig) -> Instance {
    Instance::new(&InstanceDescriptor {
        backends: config.backends,
        ..Default::default()
    })
}

/// Position of the adapter to use among enumerated `device_types`.
///
/// `index` counts GPU-class adapters only. Software adapters are considered
/// when `allow_software` is set and no GPU-class adapter exists.
pub(crate) fn pick_adapter(
    device_types: &[DeviceType],
    index: usize,
    allow_software: bool,
) -> Option<usize> {
    let has_gpu = device_types.iter().any(|&t| is_gpu_class(t));
    if has_gpu || !allow_software {
        return device_types
            .iter()
            .enumerate()
            .filter(|&(_, &t)| is_gpu_class(t))
            .map(|(i, _)| i)
            .nth(index);
    }
    (index < device_types.len()).then_some(index)
}

/// Select the `index`-th eligible adapter.
///
/// GPU-class adapters win over software ones regardless of enumeration
/// order; see [`pick_adapter`].
pub(crate) async fn select_adapter(
    instance: &Instance,
    index: usize,
    config: &ContextConfig,
) -> Result<(Adapter, Arc<AdapterInfo>)> {
    let mut adapters = instance.enumerate_adapters(config.backends).await;
    let device_types: Vec<DeviceType> = adapters
        .iter()
        .map(|adapter| adapter.get_info().device_type)
        .collect();

    let position =
        pick_adapter(&device_types, index, config.allow_software).ok_or(Error::DeviceNotFound)?;

    for (i, adapter) in adapters.iter().enumerate() {
        let info = adapter.get_info();
        if i != position && !is_gpu_class(info.device_type) {
            tracing::warn!(
                target: "densr",
                adapter = %info.name,
                device_type = ?info.device_type,
                "skipping non-GPU adapter"
            );
        }
    }

    let adapter = adapters.swap_remove(position);

    let wgpu_info = adapter.get_info();
    let info = Arc::new(AdapterInfo {
        name: wgpu_info.name,
        backend: wgpu_info.backend,
        device_type: wgpu_info.device_type,
        limits: adapter.limits(),
    });

    tracing::debug!(
        target: "densr",
        adapter = %info.name,
        backend = ?info.backend,
        device_type = ?info.device_type,
        "selected adapter"
    );

    Ok((adapter, info))
}

// ============================================================================
// Tests
// ============================================================================
