//! CPU implementation of matrix operations.
//!
//! This module contains the operation trait implementations for the CPU runtime.
//! Each operation type has its own module.

mod activation;
mod arithmetic;
mod matmul;
