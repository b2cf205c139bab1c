//! Abstract GPU sensor backend traits

use anyhow::Result;
use rg_status_core::Unavailable;

/// Live GPU counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GpuMetrics {
    /// GPU utilization in %
    pub utilization: u32,
    /// Memory used in bytes
    pub memory_used: u64,
}

/// A resolved device handle
///
/// Each call re-queries the hardware. Failures are transient and only
/// affect the current cycle.
pub trait GpuDevice: Send {
    fn metrics(&mut self) -> Result<GpuMetrics, Unavailable>;
}

/// Loads the vendor library and acquires the first device
///
/// Called at most once per [`NativeSensor`](super::NativeSensor); an error
/// marks the sensor unavailable for the rest of the run.
pub trait SensorResolver: Send {
    fn resolve(&mut self) -> Result<Box<dyn GpuDevice>>;
}

/// Resolver for builds or hosts without a supported GPU library
#[derive(Debug, Default, Clone, Copy)]
pub struct NullResolver;

impl SensorResolver for NullResolver {
    fn resolve(&mut self) -> Result<Box<dyn GpuDevice>> {
        Err(anyhow::anyhow!("no GPU sensor library configured"))
    }
}
