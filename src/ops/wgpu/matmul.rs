//! WebGPU implementation of matrix multiplication.

use crate::error::Result;
use crate::matrix::{MatrixMut, MatrixRef};
use crate::ops::MatmulOps;
use crate::ops::common::validate_matmul_shapes;
use crate::runtime::wgpu::WgpuClient;
use crate::runtime::wgpu::ops::native::native_matmul;

impl MatmulOps for WgpuClient {
    fn multiply(&self, a: MatrixRef<'_>, b: MatrixRef<'_>, mut out: MatrixMut<'_>) -> Result<()> {
        self.check_ready()?;
        let out_shape = validate_matmul_shapes(a.shape(), b.shape(), out.shape())?;
        if out_shape.is_empty() {
            return Ok(());
        }
        // Empty inner dimension: every output is an empty sum.
        if a.cols() == 0 {
            out.as_mut_slice().fill(0.0);
            return Ok(());
        }
        native_matmul(
            self,
            a.as_slice(),
            b.as_slice(),
            out.as_mut_slice(),
            a.rows(),
            a.cols(),
            b.cols(),
        )
    }
}
