//! Host-side matrix views
//!
//! A matrix is a row-major contiguous buffer of `f32` with explicit row and
//! column counts. The views in this module borrow caller-owned memory; no
//! backend allocates, resizes or keeps host matrices.

mod shape;
mod view;

pub use shape::Shape;
pub use view::{MatrixMut, MatrixRef};
