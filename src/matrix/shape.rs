//! Shape type: dimensions of a matrix

use std::fmt;

/// Rows and columns of a row-major matrix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl Shape {
    /// Create a shape.
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of elements.
    #[inline]
    pub const fn numel(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether the shape holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.numel() == 0
    }
}

impl From<(usize, usize)> for Shape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::new(rows, cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
