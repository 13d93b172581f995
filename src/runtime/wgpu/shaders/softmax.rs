//! Softmax WGSL kernel launcher
//!
//! Records the three softmax phases into one command buffer so the device
//! runs them back to back in a single submission.

use wgpu::{Buffer, Device, Queue};

use super::kernel::KernelId;
use super::pipeline::{KernelCache, create_bind_group, elementwise_grid};
use crate::error::{Error, Result};

/// Uniform parameters of the softmax kernels
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SoftmaxParams {
    pub(crate) numel: u32,
    pub(crate) _pad0: u32,
    pub(crate) _pad1: u32,
    pub(crate) _pad2: u32,
}

impl SoftmaxParams {
    pub(crate) fn new(numel: usize) -> Result<Self> {
        let numel = u32::try_from(numel)
            .map_err(|_| Error::backend(format!("{numel} elements exceed u32 indexing")))?;
        Ok(Self {
            numel,
            _pad0: 0,
            _pad1: 0,
            _pad2: 0,
        })
    }
}

/// Launch softmax over the whole of `input` into `output`.
///
/// `scratch` holds two floats: the maximum and the sum of exponentials.
#[allow(clippy::too_many_arguments)]
pub(crate) fn launch_softmax(
    device: &Device,
    queue: &Queue,
    cache: &KernelCache,
    input: &Buffer,
    output: &Buffer,
    scratch: &Buffer,
    params: &Buffer,
    numel: usize,
) -> Result<()> {
    let max = cache.get_or_compile(device, KernelId::SoftmaxMax)?;
    let exp_sum = cache.get_or_compile(device, KernelId::SoftmaxExpSum)?;
    let normalize = cache.get_or_compile(device, KernelId::SoftmaxNormalize)?;

    let grid = elementwise_grid(numel, device.limits().max_compute_workgroups_per_dimension)?;
    let buffers = [input, output, scratch, params];

    tracing::trace!(target: "densr", kernel = "softmax", numel, ?grid, "dispatch");

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("softmax"),
    });

    // Phases 1a and 1b run as a single workgroup each.
    for (entry, groups) in [(&max, (1, 1, 1)), (&exp_sum, (1, 1, 1)), (&normalize, grid)] {
        let bind_group = create_bind_group(device, entry, &buffers);
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("softmax"),
            timestamp_writes: None,
        });
        pass.set_pipeline(entry.pipeline());
        pass.set_bind_group(0, Some(&bind_group), &[]);
        pass.dispatch_workgroups(groups.0, groups.1, groups.2);
    }

    queue.submit(std::iter::once(encoder.finish()));
    Ok(())
}
