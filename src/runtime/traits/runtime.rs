//! Core trait for compute backends

use std::fmt;

/// Execution model of a backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Nested iteration on the host; the correctness oracle
    Sequential,
    /// Kernels dispatched to a parallel accelerator
    Accelerated,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Sequential => write!(f, "sequential"),
            BackendKind::Accelerated => write!(f, "accelerated"),
        }
    }
}

/// Core trait for compute backends
///
/// `Runtime` abstracts over compute devices. It uses static dispatch via
/// generics; which backend satisfies the operation contract is decided when
/// the program is composed, never by inspecting types at runtime.
///
/// # Associated Types
///
/// - `Device`: Identifies a specific compute unit
/// - `Client`: Handles operation dispatch and owns backend resources
///
/// # Example
///
/// ```
/// use densr::runtime::{BackendKind, Runtime};
/// use densr::runtime::cpu::CpuRuntime;
///
/// let device = CpuRuntime::default_device();
/// let client = CpuRuntime::default_client(&device).unwrap();
/// assert_eq!(CpuRuntime::kind(), BackendKind::Sequential);
/// # let _ = client;
/// ```
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: super::Device;

    /// Client for dispatching operations
    type Client: super::RuntimeClient<Self>;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Execution model of this runtime
    fn kind() -> BackendKind;

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Create a client for a device
    ///
    /// For accelerators this acquires device resources and may fail.
    fn default_client(device: &Self::Device) -> crate::error::Result<Self::Client>;
}
