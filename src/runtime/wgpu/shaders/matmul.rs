//! Matrix multiplication WGSL kernel launcher

use wgpu::{Buffer, Device, Queue};

use super::kernel::KernelId;
use super::pipeline::{KernelCache, MATMUL_TILE, create_bind_group};
use crate::error::{Error, Result};

/// Uniform parameters of the matmul kernel
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MatmulParams {
    pub(crate) m: u32,
    pub(crate) k: u32,
    pub(crate) n: u32,
    pub(crate) _pad0: u32,
}

impl MatmulParams {
    pub(crate) fn new(m: usize, k: usize, n: usize) -> Result<Self> {
        let dim = |d: usize| {
            u32::try_from(d).map_err(|_| Error::backend(format!("dimension {d} exceeds u32")))
        };
        Ok(Self {
            m: dim(m)?,
            k: dim(k)?,
            n: dim(n)?,
            _pad0: 0,
        })
    }
}

/// Launch `C[m, n] = A[m, k] @ B[k, n]`.
///
/// One invocation per output element; the grid is `(ceil(n/16), ceil(m/16))`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn launch_matmul(
    device: &Device,
    queue: &Queue,
    cache: &KernelCache,
    a: &Buffer,
    b: &Buffer,
    c: &Buffer,
    params: &Buffer,
    m: usize,
    n: usize,
) -> Result<()> {
    let entry = cache.get_or_compile(device, KernelId::Mul)?;

    let groups_x = n.div_ceil(MATMUL_TILE as usize);
    let groups_y = m.div_ceil(MATMUL_TILE as usize);
    let max = device.limits().max_compute_workgroups_per_dimension as usize;
    if groups_x > max || groups_y > max {
        return Err(Error::backend(format!(
            "{m}x{n} output exceeds the dispatch limit of {max} workgroups per dimension"
        )));
    }

    let bind_group = create_bind_group(device, &entry, &[a, b, c, params]);

    tracing::trace!(target: "densr", kernel = "matmul", m, n, groups_x, groups_y, "dispatch");

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("matmul"),
    });
    {
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("matmul"),
            timestamp_writes: None,
        });
        pass.set_pipeline(entry.pipeline());
        pass.set_bind_group(0, Some(&bind_group), &[]);
        pass.dispatch_workgroups(groups_x as u32, groups_y as u32, 1);
    }

    queue.submit(std::iter::once(encoder.finish()));
    Ok(())
}
