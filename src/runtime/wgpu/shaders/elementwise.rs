//! Element-wise WGSL kernel launchers
//!
//! Covers the binary (`add`, `sub`), in-place binary, unary (`scale` and the
//! activations) and in-place unary kernels. All share one geometry: one
//! invocation per element over a 1-D grid that folds into y when large.

use wgpu::{Buffer, Device, Queue};

use super::kernel::KernelId;
use super::pipeline::{KernelCache, create_bind_group, elementwise_grid};
use crate::error::{Error, Result};

/// Uniform parameters of every element-wise kernel.
/// Padding ensures 16-byte alignment for WebGPU uniform buffers.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ElementwiseParams {
    pub(crate) numel: u32,
    pub(crate) scalar: f32,
    pub(crate) _pad0: u32,
    pub(crate) _pad1: u32,
}

impl ElementwiseParams {
    pub(crate) fn new(numel: usize, scalar: f32) -> Result<Self> {
        let numel = u32::try_from(numel)
            .map_err(|_| Error::backend(format!("{numel} elements exceed u32 indexing")))?;
        Ok(Self {
            numel,
            scalar,
            _pad0: 0,
            _pad1: 0,
        })
    }
}

/// Launch an element-wise kernel over `numel` elements.
///
/// `buffers` are bound in the kernel's declaration order, the parameter
/// block last.
pub(crate) fn launch_elementwise(
    device: &Device,
    queue: &Queue,
    cache: &KernelCache,
    id: KernelId,
    buffers: &[&Buffer],
    numel: usize,
) -> Result<()> {
    debug_assert_eq!(buffers.len(), id.bindings().len());

    let entry = cache.get_or_compile(device, id)?;
    let grid = elementwise_grid(numel, device.limits().max_compute_workgroups_per_dimension)?;
    let bind_group = create_bind_group(device, &entry, buffers);

    tracing::trace!(target: "densr", kernel = id.name(), numel, ?grid, "dispatch");

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some(id.name()),
    });
    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some(id.name()),
            timestamp_writes: None,
        });
        pass.set_pipeline(entry.pipeline());
        pass.set_bind_group(0, Some(&bind_group), &[]);
        pass.dispatch_workgroups(grid.0, grid.1, grid.2);
    }

    queue.submit(std::iter::once(encoder.finish()));
    Ok(())
}
