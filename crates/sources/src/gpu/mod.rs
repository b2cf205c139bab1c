//! GPU producer backed by an optionally installed vendor library

mod backend;
mod nvidia;

pub use backend::{GpuDevice, GpuMetrics, NullResolver, SensorResolver};
pub use nvidia::{NvmlResolver, NVML_LIBRARY};

use rg_status_core::{Producer, ProducerMetadata, Reading, Unavailable, BYTES_PER_GIB};
use std::sync::{Arc, Mutex};

/// Resolution state of a [`NativeSensor`]
enum SensorState {
    Unresolved,
    Ready(Box<dyn GpuDevice>),
    /// Terminal: resolution failed and is never retried
    Unavailable,
}

/// Lazily resolved native sensor
///
/// The first query resolves the library. Resolution failures are cached
/// for the rest of the run; query failures after a successful resolution
/// only affect that query.
pub struct NativeSensor {
    resolver: Box<dyn SensorResolver>,
    state: SensorState,
}

impl NativeSensor {
    pub fn new(resolver: Box<dyn SensorResolver>) -> Self {
        Self {
            resolver,
            state: SensorState::Unresolved,
        }
    }

    pub fn query(&mut self) -> Result<GpuMetrics, Unavailable> {
        if matches!(self.state, SensorState::Unresolved) {
            self.state = match self.resolver.resolve() {
                Ok(device) => SensorState::Ready(device),
                Err(e) => {
                    log::info!("GPU sensor unavailable: {:#}", e);
                    SensorState::Unavailable
                }
            };
        }

        match &mut self.state {
            SensorState::Ready(device) => device.metrics(),
            _ => Err(Unavailable::SensorUnavailable),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SensorState::Ready(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.state, SensorState::Unavailable)
    }
}

/// Sensor handle shared by every GPU binding built from one registry
pub type SharedSensor = Arc<Mutex<NativeSensor>>;

/// "GPU 37% VRAM 1.25G"
pub struct GpuSource {
    metadata: ProducerMetadata,
    sensor: SharedSensor,
}

impl GpuSource {
    pub fn new(resolver: Box<dyn SensorResolver>) -> Self {
        Self::shared(Arc::new(Mutex::new(NativeSensor::new(resolver))))
    }

    /// Producer reading from an existing sensor handle
    pub fn shared(sensor: SharedSensor) -> Self {
        Self {
            metadata: ProducerMetadata::new(
                "gpu_combined",
                "GPU",
                "GPU utilization and used video memory (NVML)",
                None,
            ),
            sensor,
        }
    }
}

impl Producer for GpuSource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, _argument: Option<&str>) -> Reading {
        let metrics = self
            .sensor
            .lock()
            .map_err(|_| Unavailable::Query("sensor lock poisoned".to_string()))?
            .query()?;
        let vram_gib = metrics.memory_used as f64 / BYTES_PER_GIB;
        Ok(format!("GPU {}% VRAM {:.2}G", metrics.utilization, vram_gib))
    }
}
