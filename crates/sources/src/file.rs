//! File-backed producers: arbitrary file contents and thermal sensors

use rg_status_core::{require_argument, Producer, ProducerMetadata, Reading, Unavailable};

/// Which interpretation of the file to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileField {
    /// First line verbatim
    Cat,
    /// Millidegrees Celsius, reported as whole degrees
    Temperature,
}

pub struct FileSource {
    metadata: ProducerMetadata,
    field: FileField,
}

impl FileSource {
    pub fn new(field: FileField) -> Self {
        let metadata = match field {
            FileField::Cat => {
                ProducerMetadata::new("cat", "File", "First line of a file", Some("path"))
            }
            FileField::Temperature => ProducerMetadata::new(
                "temp",
                "Temperature",
                "Temperature in degrees Celsius",
                Some("sensor file (/sys/class/thermal/thermal_zone0/temp)"),
            ),
        };
        Self { metadata, field }
    }
}

impl Producer for FileSource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, argument: Option<&str>) -> Reading {
        let path = require_argument(argument)?;
        let content = std::fs::read_to_string(path).map_err(|e| Unavailable::io(path, e))?;
        let line = content
            .lines()
            .next()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .ok_or_else(|| Unavailable::Malformed(format!("{} is empty", path)))?;

        match self.field {
            FileField::Cat => Ok(line.to_string()),
            FileField::Temperature => {
                let millidegrees: i64 = line.trim().parse().map_err(|e| {
                    Unavailable::Malformed(format!("{}: {}", path, e))
                })?;
                Ok((millidegrees / 1000).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cat_first_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status");
        std::fs::write(&path, "charging\nsecond line\n").unwrap();

        let mut source = FileSource::new(FileField::Cat);
        assert_eq!(source.produce(path.to_str()).unwrap(), "charging");
    }

    #[test]
    fn test_temperature_millidegrees() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("temp");
        std::fs::write(&path, "47800\n").unwrap();

        let mut source = FileSource::new(FileField::Temperature);
        assert_eq!(source.produce(path.to_str()).unwrap(), "47");

        std::fs::write(&path, "hot\n").unwrap();
        assert!(matches!(source.produce(path.to_str()), Err(Unavailable::Malformed(_))));
    }

    #[test]
    fn test_missing_or_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty");
        std::fs::write(&empty, "").unwrap();

        let mut source = FileSource::new(FileField::Cat);
        assert!(matches!(source.produce(empty.to_str()), Err(Unavailable::Malformed(_))));

        let missing = dir.path().join("missing");
        assert!(matches!(source.produce(missing.to_str()), Err(Unavailable::Io { .. })));
        assert!(matches!(source.produce(None), Err(Unavailable::MissingArgument)));
    }
}
