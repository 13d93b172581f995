//! WebGPU implementation of the matrix operation traits.
//!
//! Every operation checks the context state first, then operand shapes,
//! before touching the device. Empty operands complete without dispatching.

mod activation;
mod arithmetic;
mod matmul;
