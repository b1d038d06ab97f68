//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layered merging in [`merger`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use pausepoint::config::{load_merged_config, validate};
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".pausepoint");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "export:\n  compression_level: 6\n").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.export.compression_level, 6);
//! ```

pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use loader::{load_config, load_config_file, load_merged_config, ConfigPaths};
pub use merger::{deep_merge, merge_layers};
pub use schema::{ExportSettings, PausepointConfig, StorageSettings};
pub use validator::{validate, validate_config};
