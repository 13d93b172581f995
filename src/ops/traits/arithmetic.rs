//! Elementwise arithmetic operations trait.

use crate::error::Result;
use crate::matrix::{MatrixMut, MatrixRef};

/// Elementwise arithmetic on equally shaped matrices
pub trait ArithmeticOps {
    /// Elementwise sum: out = a + b
    ///
    /// `a`, `b` and `out` must share one shape, else `ShapeMismatch`.
    fn add(&self, a: MatrixRef<'_>, b: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()>;

    /// In-place elementwise sum: a += b
    fn add_inplace(&self, a: MatrixMut<'_>, b: MatrixRef<'_>) -> Result<()>;

    /// Elementwise difference: out = a - b
    fn sub(&self, a: MatrixRef<'_>, b: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()>;

    /// In-place elementwise difference: a -= b
    fn sub_inplace(&self, a: MatrixMut<'_>, b: MatrixRef<'_>) -> Result<()>;

    /// Multiply every element by `scalar`: out = scalar * a
    fn scale(&self, scalar: f32, a: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()>;

    /// In-place scaling: a *= scalar
    fn scale_inplace(&self, scalar: f32, a: MatrixMut<'_>) -> Result<()>;
}
