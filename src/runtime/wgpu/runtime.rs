//! WebGPU runtime implementation

use super::client::WgpuClient;
use super::device::{WgpuDevice, create_instance, select_adapter};
use super::ContextConfig;
use crate::runtime::{BackendKind, Runtime};

/// WebGPU Runtime adapter
///
/// Implements the generic Runtime trait for the WebGPU backend.
#[derive(Clone, Debug, Default)]
pub struct WgpuRuntime;

impl Runtime for WgpuRuntime {
    type Device = WgpuDevice;
    type Client = WgpuClient;

    fn name() -> &'static str {
        "wgpu"
    }

    fn kind() -> BackendKind {
        BackendKind::Accelerated
    }

    fn default_device() -> Self::Device {
        WgpuDevice::new(0)
    }

    fn default_client(device: &Self::Device) -> crate::error::Result<Self::Client> {
        WgpuClient::acquire_on(device.clone(), ContextConfig::default())
    }
}

/// Check if a GPU-class WebGPU adapter is available.
///
/// Does not create a device.
pub fn is_wgpu_available() -> bool {
    let config = ContextConfig::default();
    let instance = create_instance(&config);
    pollster::block_on(select_adapter(&instance, 0, &config)).is_ok()
}
