//! Matrix multiplication operations trait.

use crate::error::Result;
use crate::matrix::{MatrixMut, MatrixRef};

/// Matrix multiplication operations
pub trait MatmulOps {
    /// Matrix product: out = a @ b
    ///
    /// `c[i][j] = Σ_k a[i][k] * b[k][j]`, accumulated in `f32`. Backends agree
    /// within a relative tolerance, not bit for bit.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if `a.cols != b.rows`
    /// - `ShapeMismatch` if `out` is not `(a.rows, b.cols)`
    fn multiply(&self, a: MatrixRef<'_>, b: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()>;
}
