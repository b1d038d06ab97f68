//! Pausepoint - save recorded coding sessions and export them as archives.
//!
//! Pausepoint keeps small JSON documents in a per-project collection store
//! and turns a project tree with soft-deleted nodes into a zip snapshot of
//! its live content.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`snapshot`] - Live entry materialization and zip export
//! - [`store`] - JSON document persistence under the project root
//! - [`tree`] - Project tree model and deletion resolution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use pausepoint::store::{CollectionStore, StoreLayout};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let layout = StoreLayout::new(temp.path());
//! let store = CollectionStore::open(&layout, "tags", "all.json").unwrap();
//!
//! store.write(&vec!["perf", "ui"]).unwrap();
//! let tags: Vec<String> = store.read().unwrap();
//! assert_eq!(tags, vec!["perf", "ui"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod store;
pub mod tree;
pub mod ui;

pub use error::{FailureKind, PausepointError, Result};
