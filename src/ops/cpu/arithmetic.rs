//! CPU implementation of elementwise arithmetic.

use crate::error::Result;
use crate::matrix::{MatrixMut, MatrixRef};
use crate::ops::ArithmeticOps;
use crate::ops::common::validate_same_shape;
use crate::runtime::cpu::CpuClient;
use crate::runtime::cpu::kernels::{
    binary_inplace_kernel, binary_kernel, unary_inplace_kernel, unary_kernel,
};

impl ArithmeticOps for CpuClient {
    fn add(&self, a: MatrixRef<'_>, b: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        validate_same_shape(a.shape(), b.shape())?;
        validate_same_shape(a.shape(), out.shape())?;
        binary_kernel(a.as_slice(), b.as_slice(), out.as_mut_slice(), |x, y| x + y);
        Ok(())
    }

    fn add_inplace(&self, mut a: MatrixMut<'_>, b: MatrixRef<'_>) -> Result<()> {
        validate_same_shape(a.shape(), b.shape())?;
        binary_inplace_kernel(a.as_mut_slice(), b.as_slice(), |x, y| x + y);
        Ok(())
    }

    fn sub(&self, a: MatrixRef<'_>, b: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        validate_same_shape(a.shape(), b.shape())?;
        validate_same_shape(a.shape(), out.shape())?;
        binary_kernel(a.as_slice(), b.as_slice(), out.as_mut_slice(), |x, y| x - y);
        Ok(())
    }

    fn sub_inplace(&self, mut a: MatrixMut<'_>, b: MatrixRef<'_>) -> Result<()> {
        validate_same_shape(a.shape(), b.shape())?;
        binary_inplace_kernel(a.as_mut_slice(), b.as_slice(), |x, y| x - y);
        Ok(())
    }

    fn scale(&self, scalar: f32, a: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        validate_same_shape(a.shape(), out.shape())?;
        unary_kernel(a.as_slice(), out.as_mut_slice(), |x| x * scalar);
        Ok(())
    }

    fn scale_inplace(&self, scalar: f32, mut a: MatrixMut<'_>) -> Result<()> {
        unary_inplace_kernel(a.as_mut_slice(), |x| x * scalar);
        Ok(())
    }
}
