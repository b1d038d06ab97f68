//! Live entry materialization.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{PausepointError, Result};
use crate::tree::{ContentProvider, DeletionResolver, ProjectTree, ROOT_PATH};

/// One live node of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Directory { path: String },
    File { path: String, content: String },
}

impl Entry {
    /// The node's absolute path.
    pub fn path(&self) -> &str {
        match self {
            Self::Directory { path } | Self::File { path, .. } => path,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    /// Check if this is the root directory entry.
    pub fn is_root(&self) -> bool {
        self.is_directory() && self.archive_path().is_none()
    }

    /// Project-relative path with the leading separator stripped.
    ///
    /// `None` for the root, which is the archive's implicit top level.
    pub fn archive_path(&self) -> Option<&str> {
        let relative = self.path().trim_start_matches('/');
        if relative.is_empty() {
            None
        } else {
            Some(relative)
        }
    }
}

/// The ordered live entries of a tree at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<Entry>,
}

impl Snapshot {
    /// All entries: directories first, then files, each in tree order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Directory entries, including the root.
    pub fn directories(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_directory())
    }

    /// File entries.
    pub fn files(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.is_directory())
    }

    /// Number of entries that become archive records (everything but the root).
    pub fn archive_entry_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_root()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collect every effectively-live directory and file of `tree`.
///
/// Directories are emitted before files so that empty directories survive
/// archiving. Each live file is paired with its content from `provider`.
///
/// # Errors
///
/// Returns `InconsistentState` if a live node's parent chain is broken,
/// `provider` has no content for a live file, a non-root directory has an
/// empty path, or two live nodes share a path.
pub fn materialize<P>(tree: &ProjectTree, provider: &P) -> Result<Snapshot>
where
    P: ContentProvider + ?Sized,
{
    let mut resolver = DeletionResolver::new(tree);
    let mut entries = Vec::with_capacity(tree.directory_count() + tree.file_count());
    let mut claimed: HashSet<String> = HashSet::new();
    let mut skipped = 0usize;

    for dir in tree.directories() {
        if resolver.is_directory_deleted(&dir.id)? {
            skipped += 1;
            continue;
        }
        let entry = if dir.is_root() {
            Entry::Directory {
                path: ROOT_PATH.to_string(),
            }
        } else {
            let entry = Entry::Directory {
                path: dir.path.clone(),
            };
            claim(&mut claimed, &entry, &dir.id)?;
            entry
        };
        entries.push(entry);
    }

    for file in tree.files() {
        if resolver.is_file_deleted(file)? {
            skipped += 1;
            continue;
        }
        let content = provider.file_content(&file.id).ok_or_else(|| {
            PausepointError::inconsistent(&file.id, format!("no content for live file {}", file.path))
        })?;
        let entry = Entry::File {
            path: file.path.clone(),
            content,
        };
        claim(&mut claimed, &entry, &file.id)?;
        entries.push(entry);
    }

    debug!(
        live = entries.len(),
        skipped,
        "materialized project snapshot"
    );
    Ok(Snapshot { entries })
}

/// Reserve the archive name of a non-root entry.
fn claim(claimed: &mut HashSet<String>, entry: &Entry, node: &str) -> Result<()> {
    let name = entry
        .archive_path()
        .map(|p| p.trim_end_matches('/'))
        .filter(|p| !p.is_empty())
        .ok_or_else(|| {
            PausepointError::inconsistent(
                node,
                format!("non-root node has empty path '{}'", entry.path()),
            )
        })?;
    if !claimed.insert(name.to_string()) {
        return Err(PausepointError::inconsistent(
            node,
            format!("path {} is used by another live node", entry.path()),
        ));
    }
    Ok(())
}
