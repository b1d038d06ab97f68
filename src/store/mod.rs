//! Durable JSON document storage.
//!
//! Each [`CollectionStore`] is bound to one document at
//! `<root>/<marker>/<namespace>/<name>` (see [`StoreLayout`]). Documents are
//! opaque JSON; callers pick the value type when they read or write.
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
//! assert!(!store.exists());
//! store.write(&vec!["refactor", "bugfix"]).unwrap();
//! let tags: Vec<String> = store.read().unwrap();
//! assert_eq!(tags, vec!["refactor", "bugfix"]);
//! ```

pub mod collection;
pub mod layout;

pub use collection::{CollectionStore, WriteMode};
pub use layout::{validate_segment, StoreLayout, DEFAULT_MARKER};
