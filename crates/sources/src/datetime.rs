//! Local date/time producer

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use rg_status_core::{Producer, ProducerMetadata, Reading, Unavailable};
use std::fmt::Write;

/// Format used when the binding has no argument
const DEFAULT_FORMAT: &str = "%F %T";

pub struct DateTimeSource {
    metadata: ProducerMetadata,
}

impl DateTimeSource {
    pub fn new() -> Self {
        Self {
            metadata: ProducerMetadata::new(
                "datetime",
                "Date and Time",
                "Local date and time",
                Some("strftime format (%F %T)"),
            ),
        }
    }
}

impl Default for DateTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Format `time` with a strftime pattern, rejecting invalid patterns
pub fn format_time<Tz>(time: &chrono::DateTime<Tz>, pattern: &str) -> Result<String, Unavailable>
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let items: Vec<Item> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Unavailable::Malformed(format!("invalid time format '{}'", pattern)));
    }

    let mut out = String::new();
    write!(out, "{}", time.format_with_items(items.iter()))
        .map_err(|_| Unavailable::Malformed(format!("cannot render '{}'", pattern)))?;
    Ok(out)
}

impl Producer for DateTimeSource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, argument: Option<&str>) -> Reading {
        let pattern = argument.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_FORMAT);
        format_time(&Local::now(), pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_time() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();
        assert_eq!(format_time(&time, "%m-%d %H:%M ").unwrap(), "03-09 07:05 ");
        assert_eq!(format_time(&time, "%F %T").unwrap(), "2024-03-09 07:05:00");
    }

    #[test]
    fn test_invalid_pattern_is_unavailable() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();
        assert!(matches!(
            format_time(&time, "%Q broken"),
            Err(Unavailable::Malformed(_))
        ));
    }

    #[test]
    fn test_default_pattern() {
        let mut source = DateTimeSource::new();
        let value = source.produce(None).unwrap();
        assert_eq!(value.len(), "2024-03-09 07:05:00".len());
    }
}
