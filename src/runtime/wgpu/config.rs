//! Compute context configuration

use wgpu::Backends;

/// Options for [`WgpuClient::acquire`](super::WgpuClient::acquire)
///
/// # Example
///
/// ```ignore
/// let config = ContextConfig::default()
///     .with_backends(wgpu::Backends::VULKAN)
///     .with_eager_compile(true);
/// let client = WgpuClient::acquire(config)?;
/// ```
#[derive(Clone, Debug)]
pub struct ContextConfig {
    /// Backends searched for an adapter
    pub backends: Backends,
    /// Accept CPU/software adapters when no GPU-class adapter exists
    pub allow_software: bool,
    /// Compile every registered kernel during acquire
    pub eager_compile: bool,
    /// Debug label of the device
    pub label: Option<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            backends: Backends::all(),
            allow_software: false,
            eager_compile: false,
            label: None,
        }
    }
}

impl ContextConfig {
    /// Restrict adapter search to `backends`
    pub fn with_backends(mut self, backends: Backends) -> Self {
        self.backends = backends;
        self
    }

    /// Accept CPU/software adapters
    pub fn allow_software(mut self, allow: bool) -> Self {
        self.allow_software = allow;
        self
    }

    /// Compile all kernels up front
    pub fn with_eager_compile(mut self, eager: bool) -> Self {
        self.eager_compile = eager;
        self
    }

    /// Set the device label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
