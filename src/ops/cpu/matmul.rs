//! CPU implementation of matrix multiplication.

use crate::error::Result;
use crate::matrix::{MatrixMut, MatrixRef};
use crate::ops::MatmulOps;
use crate::ops::common::validate_matmul_shapes;
use crate::runtime::cpu::CpuClient;
use crate::runtime::cpu::kernels::matmul_kernel;

impl MatmulOps for CpuClient {
    fn multiply(&self, a: MatrixRef<'_>, b: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        validate_matmul_shapes(a.shape(), b.shape(), out.shape())?;
        matmul_kernel(
            a.as_slice(),
            b.as_slice(),
            out.as_mut_slice(),
            a.rows(),
            a.cols(),
            b.cols(),
        );
        Ok(())
    }
}
