//! WebGPU Client implementation.
//!
//! `WgpuClient` is the compute context: it owns the instance, adapter,
//! device, queue and kernel cache for its whole lifetime.
//!
//! # Lifecycle
//!
//! ```text
//! acquire ──► Ready ──release──► Uninitialized (terminal)
//! ```
//!
//! Operations take `&self` and run synchronously: upload, dispatch, wait,
//! read back. `release` takes `&mut self`, so it cannot race an operation.
//! Dropping a ready client releases it.

use std::fmt;
use std::sync::Arc;
use wgpu::{Adapter, Buffer, BufferDescriptor, BufferUsages, CommandEncoder, Device, Instance, Queue};

use super::buffer::{BufferAccess, DeviceBuffer, f32_bytes};
use super::device::{WgpuDevice, create_instance, select_adapter};
use super::shaders::{KernelCache, KernelCacheStats};
use super::{ContextConfig, WgpuRuntime};
use crate::error::{Error, Result};
use crate::runtime::RuntimeClient;

/// Lifecycle state of a [`WgpuClient`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// No device resources held
    Uninitialized,
    /// Device, queue and kernel cache are live
    Ready,
}

impl ContextState {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ContextState::Uninitialized => "uninitialized",
            ContextState::Ready => "ready",
        }
    }
}

impl fmt::Display for ContextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device resources of a ready context
pub(crate) struct ContextResources {
    instance: Instance,
    adapter: Adapter,
    pub(crate) device: Device,
    pub(crate) queue: Queue,
    pub(crate) kernels: KernelCache,
}

// ============================================================================
// WgpuClient
// ============================================================================

/// WebGPU compute context.
///
/// Exclusively owns its device resources; it is intentionally not `Clone`.
pub struct WgpuClient {
    /// Device identifier with cached adapter info
    pub(crate) device_id: WgpuDevice,
    resources: Option<ContextResources>,
}

impl fmt::Debug for WgpuClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WgpuClient")
            .field("device", &self.device_id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl WgpuClient {
    /// Acquire a context on the first eligible adapter.
    ///
    /// # Errors
    ///
    /// - `DeviceNotFound` if no eligible adapter exists
    /// - `ContextCreationFailed` if the device or queue cannot be created
    /// - a compile error if `config.eager_compile` is set and a kernel fails
    pub fn acquire(config: ContextConfig) -> Result<Self> {
        Self::acquire_on(WgpuDevice::new(0), config)
    }

    /// Acquire a context on a specific eligible adapter.
    pub fn acquire_on(device: WgpuDevice, config: ContextConfig) -> Result<Self> {
        let instance = create_instance(&config);
        let (adapter, info) =
            pollster::block_on(select_adapter(&instance, device.index, &config))?;

        let label = config.label.as_deref().unwrap_or("densr compute device");
        let (wgpu_device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some(label),
                required_features: wgpu::Features::empty(),
                required_limits: adapter.limits(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
                experimental_features: wgpu::ExperimentalFeatures::default(),
            },
        ))
        .map_err(|e| Error::ContextCreationFailed {
            reason: e.to_string(),
        })?;

        tracing::debug!(
            target: "densr",
            adapter = %info.name,
            backend = ?info.backend,
            "created compute context"
        );

        let client = Self {
            device_id: WgpuDevice::with_info(device.index, Arc::clone(&info)),
            resources: Some(ContextResources {
                instance,
                adapter,
                device: wgpu_device,
                queue,
                kernels: KernelCache::new(),
            }),
        };

        if config.eager_compile {
            let res = client.resources()?;
            res.kernels.compile_all(&res.device)?;
        }

        Ok(client)
    }

    /// Release all device resources.
    ///
    /// Teardown order: queue, cached kernels, device, adapter, instance.
    /// Calling it again is a no-op.
    pub fn release(&mut self) {
        let Some(res) = self.resources.take() else {
            return;
        };
        let ContextResources {
            instance,
            adapter,
            device,
            queue,
            kernels,
        } = res;

        drop(queue);
        kernels.clear();
        drop(kernels);
        device.destroy();
        drop(device);
        drop(adapter);
        drop(instance);

        tracing::info!(target: "densr", device = ?self.device_id, "released compute context");
    }

    /// Current lifecycle state
    pub fn state(&self) -> ContextState {
        if self.resources.is_some() {
            ContextState::Ready
        } else {
            ContextState::Uninitialized
        }
    }

    /// Whether operations may be issued
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.resources.is_some()
    }

    /// Compilation counters of the kernel cache
    pub fn kernel_cache_stats(&self) -> Result<KernelCacheStats> {
        Ok(self.resources()?.kernels.stats())
    }

    /// Live resources, or `InvalidState` after release
    pub(crate) fn resources(&self) -> Result<&ContextResources> {
        self.resources.as_ref().ok_or(Error::InvalidState {
            state: ContextState::Uninitialized.as_str(),
        })
    }

    /// Fail with `InvalidState` unless the context is ready
    #[inline]
    pub(crate) fn check_ready(&self) -> Result<()> {
        self.resources().map(|_| ())
    }

    /// Get reference to the WebGPU device.
    pub fn wgpu_device(&self) -> Result<&Device> {
        Ok(&self.resources()?.device)
    }

    /// Get reference to the WebGPU queue.
    pub fn wgpu_queue(&self) -> Result<&Queue> {
        Ok(&self.resources()?.queue)
    }

    // ------------------------------------------------------------------------
    // Buffers and transfers
    // ------------------------------------------------------------------------

    /// Create a storage buffer for `numel` f32 elements.
    ///
    /// Fails with `BufferAllocationFailed` when the size exceeds the device's
    /// buffer or storage binding limit.
    pub(crate) fn create_device_buffer(
        &self,
        label: &str,
        numel: usize,
        access: BufferAccess,
    ) -> Result<DeviceBuffer> {
        let res = self.resources()?;
        let limit = self.device_id.max_storage_buffer_size();

        let bytes = f32_bytes(numel).ok_or(Error::BufferAllocationFailed {
            bytes: u64::MAX,
            limit,
        })?;
        if bytes > limit {
            return Err(Error::BufferAllocationFailed { bytes, limit });
        }

        let buffer = res.device.create_buffer(&BufferDescriptor {
            label: Some(label),
            size: bytes,
            usage: access.usages(),
            mapped_at_creation: false,
        });

        Ok(DeviceBuffer {
            buffer,
            access,
            numel,
        })
    }

    /// Create a device buffer and fill it from host memory.
    pub(crate) fn upload(
        &self,
        label: &str,
        data: &[f32],
        access: BufferAccess,
    ) -> Result<DeviceBuffer> {
        debug_assert!(access.host_writable());
        let buffer = self.create_device_buffer(label, data.len(), access)?;
        self.resources()?
            .queue
            .write_buffer(&buffer.buffer, 0, bytemuck::cast_slice(data));
        Ok(buffer)
    }

    /// Create a uniform buffer holding `params`.
    pub(crate) fn create_params_buffer<T: bytemuck::Pod>(&self, params: &T) -> Result<Buffer> {
        let res = self.resources()?;
        let buffer = res.device.create_buffer(&BufferDescriptor {
            label: Some("params"),
            size: std::mem::size_of::<T>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        res.queue.write_buffer(&buffer, 0, bytemuck::bytes_of(params));
        Ok(buffer)
    }

    /// Create a command encoder on this context's device.
    pub(crate) fn create_encoder(&self, label: &str) -> Result<CommandEncoder> {
        Ok(self
            .resources()?
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) }))
    }

    /// Copy `src` back into `output` (blocking).
    ///
    /// `output` is written only after the copy, wait and map all succeed.
    pub(crate) fn read_back(&self, src: &DeviceBuffer, output: &mut [f32]) -> Result<()> {
        debug_assert!(src.access().host_readable());
        if output.len() != src.numel {
            return Err(Error::backend(format!(
                "readback of {} elements into a buffer of {}",
                src.numel,
                output.len()
            )));
        }

        let res = self.resources()?;
        let size = src.size_bytes();
        let staging = res.device.create_buffer(&BufferDescriptor {
            label: Some("readback_staging"),
            size,
            usage: BufferUsages::MAP_READ | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self.create_encoder("readback")?;
        encoder.copy_buffer_to_buffer(&src.buffer, 0, &staging, 0, size);
        let submission = res.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        res.device
            .poll(wgpu::PollType::Wait {
                submission_index: Some(submission),
                timeout: None,
            })
            .map_err(|e| Error::backend(format!("GPU poll failed during buffer read: {e}")))?;

        let map_result = receiver.recv().map_err(|_| {
            Error::backend("map_async callback was not invoked during buffer read")
        })?;
        map_result
            .map_err(|e| Error::backend(format!("map_async failed during buffer read: {e}")))?;

        {
            let data = slice.get_mapped_range();
            output.copy_from_slice(bytemuck::cast_slice(&data));
        }

        staging.unmap();
        Ok(())
    }
}

impl Drop for WgpuClient {
    fn drop(&mut self) {
        self.release();
    }
}

impl RuntimeClient<WgpuRuntime> for WgpuClient {
    fn device(&self) -> &WgpuDevice {
        &self.device_id
    }

    fn synchronize(&self) -> Result<()> {
        self.resources()?
            .device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .map_err(|e| Error::backend(format!("GPU poll failed: {e}")))?;
        Ok(())
    }
}
