//! Trait for runtime clients that handle operation dispatch

use super::Runtime;
use crate::error::Result;

/// Trait for runtime clients that handle operation dispatch
pub trait RuntimeClient<R: Runtime>: Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Synchronize: wait for all pending operations to complete
    fn synchronize(&self) -> Result<()>;
}
