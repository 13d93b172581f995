//! Device-side operation protocol for the WebGPU runtime
//!
//! Each `native_*` function runs one operation end to end: allocate operand
//! buffers, upload, dispatch, read back. Callers have already checked the
//! context state and the operand shapes, and skip empty operands.

pub(crate) mod native;
