//! WebGPU implementation of activation operations.
//!
//! In-place activations run the out-of-place kernel into a scratch output
//! and read it back over the operand.

use crate::error::Result;
use crate::matrix::{MatrixMut, MatrixRef};
use crate::ops::ActivationOps;
use crate::ops::common::validate_same_shape;
use crate::runtime::wgpu::WgpuClient;
use crate::runtime::wgpu::KernelId;
use crate::runtime::wgpu::ops::native::{
    native_softmax, native_softmax_replace, native_unary_op, native_unary_replace,
};

impl ActivationOps for WgpuClient {
    fn sigmoid(&self, a: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()> {
        activation(self, KernelId::Sigmoid, a, out)
    }

    fn sigmoid_inplace(&self, a: MatrixMut<'_>) -> Result<()> {
        activation_inplace(self, KernelId::Sigmoid, a)
    }

    fn relu(&self, a: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()> {
        activation(self, KernelId::Relu, a, out)
    }

    fn relu_inplace(&self, a: MatrixMut<'_>) -> Result<()> {
        activation_inplace(self, KernelId::Relu, a)
    }

    fn tanh_activation(&self, a: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()> {
        activation(self, KernelId::Tanh, a, out)
    }

    fn tanh_activation_inplace(&self, a: MatrixMut<'_>) -> Result<()> {
        activation_inplace(self, KernelId::Tanh, a)
    }

    fn softmax(&self, a: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        self.check_ready()?;
        validate_same_shape(a.shape(), out.shape())?;
        if a.is_empty() {
            return Ok(());
        }
        native_softmax(self, a.as_slice(), out.as_mut_slice())
    }

    fn softmax_inplace(&self, mut a: MatrixMut<'_>) -> Result<()> {
        self.check_ready()?;
        if a.is_empty() {
            return Ok(());
        }
        native_softmax_replace(self, a.as_mut_slice())
    }
}

fn activation(
    client: &WgpuClient,
    id: KernelId,
    a: MatrixRef<'_>,
    mut out: MatrixMut<'_>,
) -> Result<()> {
    client.check_ready()?;
    validate_same_shape(a.shape(), out.shape())?;
    if a.is_empty() {
        return Ok(());
    }
    native_unary_op(client, id, 0.0, a.as_slice(), out.as_mut_slice())
}

fn activation_inplace(client: &WgpuClient, id: KernelId, mut a: MatrixMut<'_>) -> Result<()> {
    client.check_ready()?;
    if a.is_empty() {
        return Ok(());
    }
    native_unary_replace(client, id, a.as_mut_slice())
}
