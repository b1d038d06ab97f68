//! Configuration schema definitions.
//!
//! These structs map to `.pausepoint/config.yml`. Every field has a default,
//! so an absent or partial file is valid.

use serde::{Deserialize, Serialize};

use crate::snapshot::MAX_COMPRESSION_LEVEL;
use crate::store::{StoreLayout, WriteMode, DEFAULT_MARKER};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PausepointConfig {
    /// Collection storage settings
    pub storage: StorageSettings,

    /// Snapshot export settings
    pub export: ExportSettings,
}

/// Where and how collection documents are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Hidden directory under the project root holding all namespaces
    pub marker: String,

    /// Write through a temp file and rename instead of overwriting in place
    pub atomic_writes: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            atomic_writes: true,
        }
    }
}

impl StorageSettings {
    /// Build the store layout for a project root.
    pub fn layout(&self, root: impl Into<std::path::PathBuf>) -> StoreLayout {
        StoreLayout::with_marker(root, self.marker.clone())
    }

    /// The write mode implied by `atomic_writes`.
    pub fn write_mode(&self) -> WriteMode {
        if self.atomic_writes {
            WriteMode::Atomic
        } else {
            WriteMode::InPlace
        }
    }
}

/// Snapshot archive settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Deflate level, 0 (store) through 9 (maximum)
    pub compression_level: u8,

    /// Output file name used when none is given on the command line
    pub archive_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            compression_level: MAX_COMPRESSION_LEVEL,
            archive_name: "snapshot.zip".to_string(),
        }
    }
}
