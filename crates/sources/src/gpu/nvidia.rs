//! NVIDIA GPU backend using NVML

use super::backend::{GpuDevice, SensorResolver};
#[cfg(feature = "nvidia")]
use super::backend::GpuMetrics;
use anyhow::Result;
#[cfg(feature = "nvidia")]
use rg_status_core::Unavailable;

#[cfg(feature = "nvidia")]
use anyhow::Context;
#[cfg(feature = "nvidia")]
use nvml_wrapper::Nvml;

/// Conventional soname of the NVML runtime library
pub const NVML_LIBRARY: &str = "libnvidia-ml.so.1";

/// Resolves NVML at runtime and binds GPU 0
#[derive(Debug, Default, Clone, Copy)]
pub struct NvmlResolver;

impl SensorResolver for NvmlResolver {
    #[cfg(feature = "nvidia")]
    fn resolve(&mut self) -> Result<Box<dyn GpuDevice>> {
        let nvml = Nvml::builder()
            .lib_path(std::ffi::OsStr::new(NVML_LIBRARY))
            .init()
            .with_context(|| format!("Failed to load {}", NVML_LIBRARY))?;

        let name = {
            let device = nvml
                .device_by_index(0)
                .context("Failed to get NVIDIA GPU 0")?;
            device.name().unwrap_or_else(|_| "NVIDIA GPU 0".to_string())
        };
        log::info!("NVML: using {}", name);

        Ok(Box::new(NvidiaDevice { nvml, index: 0 }))
    }

    #[cfg(not(feature = "nvidia"))]
    fn resolve(&mut self) -> Result<Box<dyn GpuDevice>> {
        Err(anyhow::anyhow!("NVIDIA support not enabled at compile time"))
    }
}

/// NVML handle plus the device index; NVML shuts down when dropped
#[cfg(feature = "nvidia")]
struct NvidiaDevice {
    nvml: Nvml,
    index: u32,
}

#[cfg(feature = "nvidia")]
impl GpuDevice for NvidiaDevice {
    fn metrics(&mut self) -> Result<GpuMetrics, Unavailable> {
        let device = self
            .nvml
            .device_by_index(self.index)
            .map_err(|e| Unavailable::Query(format!("device {}: {}", self.index, e)))?;

        let utilization = device
            .utilization_rates()
            .map_err(|e| Unavailable::Query(format!("utilization: {}", e)))?
            .gpu;
        let memory = device
            .memory_info()
            .map_err(|e| Unavailable::Query(format!("memory info: {}", e)))?;

        Ok(GpuMetrics {
            utilization,
            memory_used: memory.used,
        })
    }
}
