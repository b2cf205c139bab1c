//! CPU usage producer

use rg_status_core::{Producer, ProducerMetadata, Reading, Unavailable};
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Global CPU usage in percent
///
/// Usage is a difference of two kernel tick samples, so the first call only
/// primes sysinfo and reports unavailable.
pub struct CpuSource {
    metadata: ProducerMetadata,
    system: System,
    primed: bool,
}

impl CpuSource {
    pub fn new() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage()),
        );

        Self {
            metadata: ProducerMetadata::new(
                "cpu_perc",
                "CPU Usage",
                "CPU usage in percent",
                None,
            ),
            system,
            primed: false,
        }
    }
}

impl Default for CpuSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer for CpuSource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, _argument: Option<&str>) -> Reading {
        self.system.refresh_cpu_usage();
        if !self.primed {
            self.primed = true;
            return Err(Unavailable::Cold);
        }
        let usage = self.system.global_cpu_usage();
        if !usage.is_finite() {
            return Err(Unavailable::Malformed(format!("cpu usage {}", usage)));
        }
        Ok(format!("{}", usage.round() as u32))
    }
}
