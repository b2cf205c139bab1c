//! Memory (RAM) producers

use rg_status_core::{fmt_human, Producer, ProducerMetadata, Reading, Unavailable};
use sysinfo::{MemoryRefreshKind, System};

/// Which memory figure to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryField {
    /// Used RAM in binary human units ("7.3 Gi")
    Used,
    /// Used RAM in percent of total
    Percent,
}

/// RAM usage via sysinfo
pub struct MemorySource {
    metadata: ProducerMetadata,
    field: MemoryField,
    system: System,
}

impl MemorySource {
    pub fn new(field: MemoryField) -> Self {
        let metadata = match field {
            MemoryField::Used => {
                ProducerMetadata::new("ram_used", "RAM Used", "Used memory", None)
            }
            MemoryField::Percent => ProducerMetadata::new(
                "ram_perc",
                "RAM Usage",
                "Memory usage in percent",
                None,
            ),
        };

        Self {
            metadata,
            field,
            system: System::new(),
        }
    }
}

/// Used memory as an integer percentage of `total`
pub fn percent_of(used: u64, total: u64) -> Option<u64> {
    if total == 0 {
        return None;
    }
    Some((used as u128 * 100 / total as u128) as u64)
}

impl Producer for MemorySource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, _argument: Option<&str>) -> Reading {
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::new().with_ram());
        let total = self.system.total_memory();
        let used = self.system.used_memory();

        match self.field {
            MemoryField::Used => {
                if total == 0 {
                    return Err(Unavailable::Malformed("total memory is zero".to_string()));
                }
                Ok(fmt_human(used, 1024))
            }
            MemoryField::Percent => percent_of(used, total)
                .map(|p| p.to_string())
                .ok_or_else(|| Unavailable::Malformed("total memory is zero".to_string())),
        }
    }
}
