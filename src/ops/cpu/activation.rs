//! CPU implementation of activation operations.

use crate::error::Result;
use crate::matrix::{MatrixMut, MatrixRef};
use crate::ops::ActivationOps;
use crate::ops::common::{relu, sigmoid, tanh, validate_same_shape};
use crate::runtime::cpu::CpuClient;
use crate::runtime::cpu::kernels::{softmax_inplace_kernel, unary_inplace_kernel, unary_kernel};

impl ActivationOps for CpuClient {
    fn sigmoid(&self, a: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        validate_same_shape(a.shape(), out.shape())?;
        unary_kernel(a.as_slice(), out.as_mut_slice(), sigmoid);
        Ok(())
    }

    fn sigmoid_inplace(&self, mut a: MatrixMut<'_>) -> Result<()> {
        unary_inplace_kernel(a.as_mut_slice(), sigmoid);
        Ok(())
    }

    fn relu(&self, a: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        validate_same_shape(a.shape(), out.shape())?;
        unary_kernel(a.as_slice(), out.as_mut_slice(), relu);
        Ok(())
    }

    fn relu_inplace(&self, mut a: MatrixMut<'_>) -> Result<()> {
        unary_inplace_kernel(a.as_mut_slice(), relu);
        Ok(())
    }

    fn tanh_activation(&self, a: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        validate_same_shape(a.shape(), out.shape())?;
        unary_kernel(a.as_slice(), out.as_mut_slice(), tanh);
        Ok(())
    }

    fn tanh_activation_inplace(&self, mut a: MatrixMut<'_>) -> Result<()> {
        unary_inplace_kernel(a.as_mut_slice(), tanh);
        Ok(())
    }

    fn softmax(&self, a: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        validate_same_shape(a.shape(), out.shape())?;
        let out = out.as_mut_slice();
        out.copy_from_slice(a.as_slice());
        softmax_inplace_kernel(out);
        Ok(())
    }

    fn softmax_inplace(&self, mut a: MatrixMut<'_>) -> Result<()> {
        softmax_inplace_kernel(a.as_mut_slice());
        Ok(())
    }
}
