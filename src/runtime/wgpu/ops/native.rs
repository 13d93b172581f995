//! Native GPU operation implementations for WebGPU.
//!
//! Caller memory is written only by the final readback, so a failure at any
//! earlier step leaves outputs untouched. Operand buffers are dropped on
//! return; compiled kernels stay cached.

use super::super::WgpuClient;
use super::super::buffer::{BufferAccess, DeviceBuffer};
use super::super::shaders::{KernelId, launch_elementwise, launch_matmul, launch_softmax};
use super::super::shaders::elementwise::ElementwiseParams;
use super::super::shaders::matmul::MatmulParams;
use super::super::shaders::softmax::SoftmaxParams;
use crate::error::Result;

/// `out = a op b` for `Add` / `Sub`
pub(crate) fn native_binary_op(
    client: &WgpuClient,
    id: KernelId,
    a: &[f32],
    b: &[f32],
    out: &mut [f32],
) -> Result<()> {
    let numel = out.len();
    let res = client.resources()?;

    let a_buf = client.upload("binary_a", a, BufferAccess::ReadOnly)?;
    let b_buf = client.upload("binary_b", b, BufferAccess::ReadOnly)?;
    let out_buf = client.create_device_buffer("binary_out", numel, BufferAccess::WriteOnly)?;
    let params_buf = client.create_params_buffer(&ElementwiseParams::new(numel, 0.0)?)?;

    launch_elementwise(
        &res.device,
        &res.queue,
        &res.kernels,
        id,
        &[a_buf.raw(), b_buf.raw(), out_buf.raw(), &params_buf],
        numel,
    )?;

    client.read_back(&out_buf, out)
}

/// `a = a op b` for `AddInplace` / `SubInplace`
pub(crate) fn native_binary_inplace_op(
    client: &WgpuClient,
    id: KernelId,
    a: &mut [f32],
    b: &[f32],
) -> Result<()> {
    let numel = a.len();
    let res = client.resources()?;

    let a_buf = client.upload("inplace_a", a, BufferAccess::ReadWrite)?;
    let b_buf = client.upload("inplace_b", b, BufferAccess::ReadOnly)?;
    let params_buf = client.create_params_buffer(&ElementwiseParams::new(numel, 0.0)?)?;

    launch_elementwise(
        &res.device,
        &res.queue,
        &res.kernels,
        id,
        &[a_buf.raw(), b_buf.raw(), &params_buf],
        numel,
    )?;

    client.read_back(&a_buf, a)
}

/// `out = f(a)` for `Scale` and the activations; `scalar` feeds `Scale`
pub(crate) fn native_unary_op(
    client: &WgpuClient,
    id: KernelId,
    scalar: f32,
    a: &[f32],
    out: &mut [f32],
) -> Result<()> {
    let out_buf = dispatch_unary(client, id, scalar, a)?;
    client.read_back(&out_buf, out)
}

/// `a = f(a)` for the activations, through a separate output buffer
pub(crate) fn native_unary_replace(client: &WgpuClient, id: KernelId, a: &mut [f32]) -> Result<()> {
    let out_buf = dispatch_unary(client, id, 0.0, a)?;
    client.read_back(&out_buf, a)
}

fn dispatch_unary(
    client: &WgpuClient,
    id: KernelId,
    scalar: f32,
    a: &[f32],
) -> Result<DeviceBuffer> {
    let numel = a.len();
    let res = client.resources()?;

    let a_buf = client.upload("unary_a", a, BufferAccess::ReadOnly)?;
    let out_buf = client.create_device_buffer("unary_out", numel, BufferAccess::WriteOnly)?;
    let params_buf = client.create_params_buffer(&ElementwiseParams::new(numel, scalar)?)?;

    launch_elementwise(
        &res.device,
        &res.queue,
        &res.kernels,
        id,
        &[a_buf.raw(), out_buf.raw(), &params_buf],
        numel,
    )?;

    Ok(out_buf)
}

/// `a = s * a`
pub(crate) fn native_scale_inplace(client: &WgpuClient, scalar: f32, a: &mut [f32]) -> Result<()> {
    let numel = a.len();
    let res = client.resources()?;

    let a_buf = client.upload("scale_a", a, BufferAccess::ReadWrite)?;
    let params_buf = client.create_params_buffer(&ElementwiseParams::new(numel, scalar)?)?;

    launch_elementwise(
        &res.device,
        &res.queue,
        &res.kernels,
        KernelId::ScaleInplace,
        &[a_buf.raw(), &params_buf],
        numel,
    )?;

    client.read_back(&a_buf, a)
}

/// `out[m, n] = a[m, k] @ b[k, n]`, `k > 0`
pub(crate) fn native_matmul(
    client: &WgpuClient,
    a: &[f32],
    b: &[f32],
    out: &mut [f32],
    m: usize,
    k: usize,
    n: usize,
) -> Result<()> {
    let res = client.resources()?;

    let a_buf = client.upload("matmul_a", a, BufferAccess::ReadOnly)?;
    let b_buf = client.upload("matmul_b", b, BufferAccess::ReadOnly)?;
    let c_buf = client.create_device_buffer("matmul_c", m * n, BufferAccess::WriteOnly)?;
    let params_buf = client.create_params_buffer(&MatmulParams::new(m, k, n)?)?;

    launch_matmul(
        &res.device,
        &res.queue,
        &res.kernels,
        a_buf.raw(),
        b_buf.raw(),
        c_buf.raw(),
        &params_buf,
        m,
        n,
    )?;

    client.read_back(&c_buf, out)
}

/// Softmax over the whole of `a` into `out`
pub(crate) fn native_softmax(client: &WgpuClient, a: &[f32], out: &mut [f32]) -> Result<()> {
    let out_buf = dispatch_softmax(client, a)?;
    client.read_back(&out_buf, out)
}

/// Softmax of `a` written back into `a`
pub(crate) fn native_softmax_replace(client: &WgpuClient, a: &mut [f32]) -> Result<()> {
    let out_buf = dispatch_softmax(client, a)?;
    client.read_back(&out_buf, a)
}

fn dispatch_softmax(client: &WgpuClient, a: &[f32]) -> Result<DeviceBuffer> {
    let numel = a.len();
    let res = client.resources()?;

    let in_buf = client.upload("softmax_in", a, BufferAccess::ReadOnly)?;
    let out_buf = client.create_device_buffer("softmax_out", numel, BufferAccess::WriteOnly)?;
    let scratch = client.create_device_buffer("softmax_scratch", 2, BufferAccess::ReadWrite)?;
    let params_buf = client.create_params_buffer(&SoftmaxParams::new(numel)?)?;

    launch_softmax(
        &res.device,
        &res.queue,
        &res.kernels,
        in_buf.raw(),
        out_buf.raw(),
        scratch.raw(),
        &params_buf,
        numel,
    )?;

    Ok(out_buf)
}
