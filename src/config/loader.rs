//! Configuration file discovery and loading.
//!
//! Config always lives under the default marker directory, regardless of
//! the `storage.marker` it configures:
//!
//! 1. Project config (`.pausepoint/config.yml`)
//! 2. Local overrides (`.pausepoint/config.local.yml`)

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::merger::merge_layers;
use crate::config::schema::PausepointConfig;
use crate::error::{PausepointError, Result};
use crate::store::DEFAULT_MARKER;

/// Paths to configuration files in merge order (later overrides earlier).
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Project config: .pausepoint/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .pausepoint/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(DEFAULT_MARKER);
        Self {
            project: existing(dir.join("config.yml")),
            project_local: existing(dir.join("config.local.yml")),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `NotFound` if the file doesn't exist and `ConfigParseError` if
/// the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PausepointConfig> {
    let value = load_config_value(path)?;
    parse_value(value, path)
}

/// Load a config file as a raw YAML value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PausepointError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            PausepointError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| PausepointError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge the project config and local overrides.
///
/// A project without any config file gets the defaults.
pub fn load_merged_config(project_root: &Path) -> Result<PausepointConfig> {
    let paths = ConfigPaths::discover(project_root);
    let existing = paths.all_existing();

    if existing.is_empty() {
        debug!("no config found under {:?}, using defaults", project_root);
        return Ok(PausepointConfig::default());
    }

    let layers = existing
        .iter()
        .map(|p| load_config_value(p))
        .collect::<Result<Vec<_>>>()?;

    parse_value(
        merge_layers(&layers),
        &project_root.join(DEFAULT_MARKER).join("config.yml"),
    )
}

/// Load config with an optional explicit file.
///
/// An explicit file is loaded alone, without merging.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PausepointConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}

fn parse_value(value: serde_yaml::Value, source: &Path) -> Result<PausepointConfig> {
    // An empty file is a valid config with all defaults.
    if value.is_null() {
        return Ok(PausepointConfig::default());
    }
    serde_yaml::from_value(value).map_err(|e| PausepointError::ConfigParseError {
        path: source.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, name: &str, body: &str) {
        let dir = root.join(".pausepoint");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn missing_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, PausepointConfig::default());
    }

    #[test]
    fn discover_finds_both_files() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "{}");
        write_config(temp.path(), "config.local.yml", "{}");

        let paths = ConfigPaths::discover(temp.path());
        assert_eq!(paths.all_existing().len(), 2);
    }

    #[test]
    fn local_overrides_project() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "storage:\n  marker: .sessions\nexport:\n  compression_level: 6\n",
        );
        write_config(temp.path(), "config.local.yml", "export:\n  compression_level: 2\n");

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.storage.marker, ".sessions");
        assert_eq!(config.export.compression_level, 2);
    }

    #[test]
    fn empty_file_is_default_config() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "");

        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config, PausepointConfig::default());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "export: [unclosed");

        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, PausepointError::ConfigParseError { .. }));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "export:\n  compression_level: high\n");

        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, PausepointError::ConfigParseError { .. }));
    }

    #[test]
    fn explicit_file_skips_merging() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "export:\n  archive_name: a.zip\n");
        let explicit = temp.path().join("other.yml");
        fs::write(&explicit, "export:\n  compression_level: 1\n").unwrap();

        let config = load_config(temp.path(), Some(&explicit)).unwrap();
        assert_eq!(config.export.compression_level, 1);
        assert_eq!(config.export.archive_name, "snapshot.zip");
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(&temp.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, PausepointError::NotFound { .. }));
    }
}
