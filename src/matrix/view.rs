//! Borrowed matrix views

use super::Shape;
use crate::error::{Error, Result};

fn check_len(len: usize, rows: usize, cols: usize) -> Result<Shape> {
    match rows.checked_mul(cols) {
        Some(n) if n == len => Ok(Shape::new(rows, cols)),
        _ => Err(Error::BufferLengthMismatch { len, rows, cols }),
    }
}

/// Read-only view of a caller-owned row-major matrix.
///
/// # Example
///
/// ```
/// use densr::matrix::MatrixRef;
///
/// let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let m = MatrixRef::new(&data, 2, 3).unwrap();
/// assert_eq!(m.get(1, 0), 4.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MatrixRef<'a> {
    data: &'a [f32],
    shape: Shape,
}

impl<'a> MatrixRef<'a> {
    /// Wrap `data` as a `rows x cols` matrix.
    ///
    /// Fails with `BufferLengthMismatch` unless `data.len() == rows * cols`.
    pub fn new(data: &'a [f32], rows: usize, cols: usize) -> Result<Self> {
        let shape = check_len(data.len(), rows, cols)?;
        Ok(Self { data, shape })
    }

    /// Wrap `data` as a single-row matrix.
    pub fn row(data: &'a [f32]) -> Self {
        Self {
            data,
            shape: Shape::new(1, data.len()),
        }
    }

    /// Shape of the matrix.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Number of elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Underlying row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.shape.rows && col < self.shape.cols);
        self.data[row * self.shape.cols + col]
    }
}

/// Writable view of a caller-owned row-major matrix.
///
/// Used for caller-allocated outputs and for the operand of in-place
/// operations.
#[derive(Debug)]
pub struct MatrixMut<'a> {
    data: &'a mut [f32],
    shape: Shape,
}

impl<'a> MatrixMut<'a> {
    /// Wrap `data` as a `rows x cols` matrix.
    ///
    /// Fails with `BufferLengthMismatch` unless `data.len() == rows * cols`.
    pub fn new(data: &'a mut [f32], rows: usize, cols: usize) -> Result<Self> {
        let shape = check_len(data.len(), rows, cols)?;
        Ok(Self { data, shape })
    }

    /// Wrap `data` as a single-row matrix.
    pub fn row(data: &'a mut [f32]) -> Self {
        let shape = Shape::new(1, data.len());
        Self { data, shape }
    }

    /// Shape of the matrix.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Number of elements.
    #[inline]
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Underlying row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        self.data
    }

    /// Underlying row-major buffer, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        self.data
    }

    /// Reborrow as a read-only view.
    #[inline]
    pub fn as_view(&self) -> MatrixRef<'_> {
        MatrixRef {
            data: self.data,
            shape: self.shape,
        }
    }

    /// Reborrow as a shorter-lived writable view.
    #[inline]
    pub fn reborrow(&mut self) -> MatrixMut<'_> {
        MatrixMut {
            data: self.data,
            shape: self.shape,
        }
    }
}
