//! Snapshot export.
//!
//! Exporting is a two-stage pipeline over a quiescent tree:
//!
//! 1. [`materialize`] walks the tree and collects every effectively-live
//!    directory and file, pairing files with their content.
//! 2. [`ArchiveWriter`] serializes those entries into a zip held in memory.
//!
//! A failure in either stage aborts the whole export.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use pausepoint::snapshot::{export_snapshot, ArchiveWriter};
//! use pausepoint::tree::{Directory, File, ProjectTree};
//!
//! let tree = ProjectTree::new()
//!     .with_directory(Directory::root("root"))
//!     .with_directory(Directory::new("src", "/src", Some("root")))
//!     .with_file(File::new("main", "/src/main.rs", "src"));
//!
//! let mut contents = HashMap::new();
//! contents.insert("main".to_string(), "fn main() {}".to_string());
//!
//! let archive = export_snapshot(&tree, &contents, &ArchiveWriter::new()).unwrap();
//! assert_eq!(archive.directories, 1);
//! assert_eq!(archive.files, 1);
//! ```

pub mod archive;
pub mod materialize;

pub use archive::{ArchiveWriter, MAX_COMPRESSION_LEVEL};
pub use materialize::{materialize, Entry, Snapshot};

use tracing::info;

use crate::error::Result;
use crate::tree::{ContentProvider, ProjectTree};

/// A finished export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArchive {
    /// Zip archive bytes.
    pub bytes: Vec<u8>,
    /// Directory records in the archive (the root is not counted).
    pub directories: usize,
    /// File records in the archive.
    pub files: usize,
    /// Archive record names, in write order.
    pub paths: Vec<String>,
}

impl ExportedArchive {
    /// Total records in the archive.
    pub fn entry_count(&self) -> usize {
        self.directories + self.files
    }
}

/// Materialize `tree` and archive the result.
pub fn export_snapshot<P>(
    tree: &ProjectTree,
    provider: &P,
    writer: &ArchiveWriter,
) -> Result<ExportedArchive>
where
    P: ContentProvider + ?Sized,
{
    let snapshot = materialize(tree, provider)?;
    let directories = snapshot.directories().filter(|e| !e.is_root()).count();
    let files = snapshot.files().count();
    let paths = snapshot
        .entries()
        .iter()
        .filter_map(|e| e.archive_path().map(String::from))
        .collect();

    let bytes = writer.write(snapshot.entries())?;

    info!(directories, files, bytes = bytes.len(), "exported snapshot");
    Ok(ExportedArchive {
        bytes,
        directories,
        files,
        paths,
    })
}
