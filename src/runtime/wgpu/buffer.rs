//! Device buffers for one operation

use wgpu::{Buffer, BufferUsages};

/// How a kernel uses an operand buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferAccess {
    /// Input: written by the host, read by the kernel
    ReadOnly,
    /// Output: written by the kernel, read back by the host
    WriteOnly,
    /// In-place operand: written by the host, updated by the kernel, read back
    ReadWrite,
}

impl BufferAccess {
    /// Buffer usages needed for this access mode
    pub fn usages(self) -> BufferUsages {
        match self {
            BufferAccess::ReadOnly => BufferUsages::STORAGE | BufferUsages::COPY_DST,
            BufferAccess::WriteOnly => BufferUsages::STORAGE | BufferUsages::COPY_SRC,
            BufferAccess::ReadWrite => {
                BufferUsages::STORAGE | BufferUsages::COPY_DST | BufferUsages::COPY_SRC
            }
        }
    }

    /// Whether the host may upload into the buffer
    #[inline]
    pub fn host_writable(self) -> bool {
        self != BufferAccess::WriteOnly
    }

    /// Whether the host may read the buffer back
    #[inline]
    pub fn host_readable(self) -> bool {
        self != BufferAccess::ReadOnly
    }
}

/// A storage buffer holding one matrix operand
///
/// Lives for a single operation and is released when dropped.
pub struct DeviceBuffer {
    pub(crate) buffer: Buffer,
    pub(crate) access: BufferAccess,
    pub(crate) numel: usize,
}

impl DeviceBuffer {
    /// Underlying wgpu buffer
    #[inline]
    pub fn raw(&self) -> &Buffer {
        &self.buffer
    }

    /// Access mode the buffer was created with
    #[inline]
    pub fn access(&self) -> BufferAccess {
        self.access
    }

    /// Number of f32 elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.numel
    }

    /// Size in bytes
    #[inline]
    pub fn size_bytes(&self) -> u64 {
        (self.numel * std::mem::size_of::<f32>()) as u64
    }
}

/// Bytes needed for `numel` f32 elements, `None` on overflow
pub(crate) fn f32_bytes(numel: usize) -> Option<u64> {
    numel
        .checked_mul(std::mem::size_of::<f32>())
        .and_then(|b| u64::try_from(b).ok())
}
