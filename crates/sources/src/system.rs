//! Host-level producers: hostname, load average, uptime

use rg_status_core::{Producer, ProducerMetadata, Reading, Unavailable};
use sysinfo::System;

/// Which host fact to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemField {
    Hostname,
    LoadAvg,
    Uptime,
}

pub struct SystemSource {
    metadata: ProducerMetadata,
    field: SystemField,
}

impl SystemSource {
    pub fn new(field: SystemField) -> Self {
        let metadata = match field {
            SystemField::Hostname => {
                ProducerMetadata::new("hostname", "Hostname", "Host name", None)
            }
            SystemField::LoadAvg => ProducerMetadata::new(
                "load_avg",
                "Load Average",
                "1, 5 and 15 minute load averages",
                None,
            ),
            SystemField::Uptime => {
                ProducerMetadata::new("uptime", "Uptime", "System uptime", None)
            }
        };
        Self { metadata, field }
    }
}

/// "3h 25m"
pub fn format_uptime(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}

impl Producer for SystemSource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, _argument: Option<&str>) -> Reading {
        match self.field {
            SystemField::Hostname => System::host_name()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| Unavailable::Malformed("no host name".to_string())),
            SystemField::LoadAvg => {
                let load = System::load_average();
                Ok(format!("{:.2} {:.2} {:.2}", load.one, load.five, load.fifteen))
            }
            SystemField::Uptime => Ok(format_uptime(System::uptime())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "0h 0m");
        assert_eq!(format_uptime(59), "0h 0m");
        assert_eq!(format_uptime(3600 + 25 * 60 + 7), "1h 25m");
        assert_eq!(format_uptime(50 * 3600), "50h 0m");
    }

    #[test]
    fn test_load_avg_shape() {
        let mut source = SystemSource::new(SystemField::LoadAvg);
        let value = source.produce(None).unwrap();
        assert_eq!(value.split(' ').count(), 3);
    }
}
