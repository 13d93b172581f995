//! WebGPU implementation of elementwise arithmetic.

use crate::error::Result;
use crate::matrix::{MatrixMut, MatrixRef};
use crate::ops::ArithmeticOps;
use crate::ops::common::validate_same_shape;
use crate::runtime::wgpu::WgpuClient;
use crate::runtime::wgpu::KernelId;
use crate::runtime::wgpu::ops::native::{
    native_binary_inplace_op, native_binary_op, native_scale_inplace, native_unary_op,
};

impl ArithmeticOps for WgpuClient {
    fn add(&self, a: MatrixRef<'_>, b: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()> {
        binary(self, KernelId::Add, a, b, out)
    }

    fn add_inplace(&self, a: MatrixMut<'_>, b: MatrixRef<'_>) -> Result<()> {
        binary_inplace(self, KernelId::AddInplace, a, b)
    }

    fn sub(&self, a: MatrixRef<'_>, b: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()> {
        binary(self, KernelId::Sub, a, b, out)
    }

    fn sub_inplace(&self, a: MatrixMut<'_>, b: MatrixRef<'_>) -> Result<()> {
        binary_inplace(self, KernelId::SubInplace, a, b)
    }

    fn scale(&self, scalar: f32, a: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        self.check_ready()?;
        validate_same_shape(a.shape(), out.shape())?;
        if a.is_empty() {
            return Ok(());
        }
        native_unary_op(self, KernelId::Scale, scalar, a.as_slice(), out.as_mut_slice())
    }

    fn scale_inplace(&self, scalar: f32, mut a: MatrixMut<'_>) -> Result<()> {
        self.check_ready()?;
        if a.is_empty() {
            return Ok(());
        }
        native_scale_inplace(self, scalar, a.as_mut_slice())
    }
}

fn binary(
    client: &WgpuClient,
    id: KernelId,
    a: MatrixRef<'_>,
    b: MatrixRef<'_>,
    mut out: MatrixMut<'_>,
) -> Result<()> {
    client.check_ready()?;
    validate_same_shape(a.shape(), b.shape())?;
    validate_same_shape(a.shape(), out.shape())?;
    if a.is_empty() {
        return Ok(());
    }
    native_binary_op(client, id, a.as_slice(), b.as_slice(), out.as_mut_slice())
}

fn binary_inplace(
    client: &WgpuClient,
    id: KernelId,
    mut a: MatrixMut<'_>,
    b: MatrixRef<'_>,
) -> Result<()> {
    client.check_ready()?;
    validate_same_shape(a.shape(), b.shape())?;
    if a.is_empty() {
        return Ok(());
    }
    native_binary_inplace_op(client, id, a.as_mut_slice(), b.as_slice())
}
