//! Activation operations trait.

use crate::error::Result;
use crate::matrix::{MatrixMut, MatrixRef};

/// Activation operations
pub trait ActivationOps {
    /// Sigmoid: 1 / (1 + e^(-a))
    fn sigmoid(&self, a: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()>;

    /// In-place sigmoid
    fn sigmoid_inplace(&self, a: MatrixMut<'_>) -> Result<()>;

    /// Rectified linear unit, computed as (a + |a|) / 2
    fn relu(&self, a: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()>;

    /// In-place ReLU
    fn relu_inplace(&self, a: MatrixMut<'_>) -> Result<()>;

    /// Hyperbolic tangent: (e^a - e^-a) / (e^a + e^-a)
    ///
    /// Inputs are clamped to `±TANH_CLAMP` first so saturated values come
    /// out as ±1 instead of NaN.
    fn tanh_activation(&self, a: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()>;

    /// In-place hyperbolic tangent
    fn tanh_activation_inplace(&self, a: MatrixMut<'_>) -> Result<()>;

    /// Softmax over the whole buffer, treated as one vector
    ///
    /// Computed as `exp(a - max(a)) / sum(exp(a - max(a)))`.
    fn softmax(&self, a: MatrixRef<'_>, out: MatrixMut<'_>) -> Result<()>;

    /// In-place softmax
    fn softmax_inplace(&self, a: MatrixMut<'_>) -> Result<()>;
}
