//! Shared validation and numerics used by every backend.

use crate::error::{Error, Result};
use crate::matrix::Shape;

/// Magnitude at which `tanh_activation` inputs are clamped.
///
/// `tanh(20)` rounds to exactly 1.0 in `f32`, while `e^x` for much larger `x`
/// overflows and turns the quotient into NaN.
pub const TANH_CLAMP: f32 = 20.0;

/// Validate that two operands of an elementwise op share one shape.
#[inline]
pub(crate) fn validate_same_shape(a: Shape, b: Shape) -> Result<()> {
    if a != b {
        return Err(Error::shape_mismatch(a, b));
    }
    Ok(())
}

/// Validate matmul operands and return the output shape.
///
/// # Errors
///
/// - `DimensionMismatch` if the inner dimensions differ
/// - `ShapeMismatch` if `out` is not `(a.rows, b.cols)`
#[inline]
pub(crate) fn validate_matmul_shapes(a: Shape, b: Shape, out: Shape) -> Result<Shape> {
    if a.cols != b.rows {
        return Err(Error::DimensionMismatch {
            lhs_cols: a.cols,
            rhs_rows: b.rows,
        });
    }
    let expected = Shape::new(a.rows, b.cols);
    validate_same_shape(expected, out)?;
    Ok(expected)
}

#[inline]
pub(crate) fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[inline]
pub(crate) fn relu(x: f32) -> f32 {
    (x + x.abs()) / 2.0
}

#[inline]
pub(crate) fn tanh(x: f32) -> f32 {
    let x = x.clamp(-TANH_CLAMP, TANH_CLAMP);
    let e = x.exp();
    let ne = (-x).exp();
    (e - ne) / (e + ne)
}
