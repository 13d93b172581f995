//! Operation traits for the matrix contract.
//!
//! Implementations are in the backend-specific modules (cpu/, wgpu/).

mod activation;
mod arithmetic;
mod matmul;

pub use activation::ActivationOps;
pub use arithmetic::ArithmeticOps;
pub use matmul::MatmulOps;

/// The full matrix operation contract.
///
/// Implemented automatically for every type implementing the individual
/// operation traits, so backend-generic code can take a single bound.
pub trait MatrixOps: ArithmeticOps + MatmulOps + ActivationOps {}

impl<T: ArithmeticOps + MatmulOps + ActivationOps + ?Sized> MatrixOps for T {}
