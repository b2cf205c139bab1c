//! Loading and saving the status table

use anyhow::{Context, Result};
use rg_status_types::StatusConfig;
use std::path::{Path, PathBuf};

/// Load configuration from the user config directory
///
/// A missing file is not an error: the built-in default table is used.
pub fn load() -> Result<StatusConfig> {
    let path = config_path()?;

    if !path.exists() {
        log::info!("No config at {}, using built-in defaults", path.display());
        return Ok(StatusConfig::default());
    }

    load_from_path(&path)
}

/// Load configuration from a specific file path
pub fn load_from_path(path: &Path) -> Result<StatusConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Save configuration to a specific file path
pub fn save_to_path(config: &StatusConfig, path: &Path) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "github.hilgardt_collab", "rg-status")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_status_types::BindingConfig;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = StatusConfig {
            interval_ms: 500,
            bindings: vec![BindingConfig::new("hostname", "[%s]", None, 0)],
            ..StatusConfig::default()
        };
        save_to_path(&config, &path).unwrap();

        let loaded = load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
