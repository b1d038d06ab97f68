//! Effective deletion.
//!
//! Deletion is inherited: a node is effectively deleted when its own flag is
//! set or any ancestor's flag is set. A file's ancestor chain starts at its
//! parent directory.

use std::collections::HashMap;

use super::{File, ProjectTree};
use crate::error::{PausepointError, Result};

/// A node reference. Ids are only unique within their kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    Directory(&'a str),
    File(&'a str),
}

/// Walk the parent chain of `node` and report whether it is effectively
/// deleted. Cost is proportional to the node's depth.
///
/// # Errors
///
/// Returns `InconsistentState` if the node is unknown, if a parent id does
/// not name a directory, or if the parent chain loops.
pub fn is_effectively_deleted(tree: &ProjectTree, node: NodeRef<'_>) -> Result<bool> {
    let (own_flag, mut parent, mut child) = match node {
        NodeRef::Directory(id) => {
            let dir = tree
                .directory(id)
                .ok_or_else(|| PausepointError::inconsistent(id, "unknown directory"))?;
            (dir.is_deleted, dir.parent_id.as_deref(), id)
        }
        NodeRef::File(id) => {
            let file = tree
                .file(id)
                .ok_or_else(|| PausepointError::inconsistent(id, "unknown file"))?;
            (file.is_deleted, Some(file.parent_id.as_str()), id)
        }
    };

    if own_flag {
        return Ok(true);
    }

    let mut steps = 0;
    while let Some(parent_id) = parent {
        steps += 1;
        if steps > tree.directory_count() {
            return Err(cycle_error(child));
        }
        let dir = tree
            .directory(parent_id)
            .ok_or_else(|| dangling_parent_error(child, parent_id))?;
        if dir.is_deleted {
            return Ok(true);
        }
        child = parent_id;
        parent = dir.parent_id.as_deref();
    }

    Ok(false)
}

/// Memoizing resolver for a single pass over one tree.
///
/// Each directory's verdict is computed once; later queries for it or any
/// of its descendants stop at the first memoized ancestor.
#[derive(Debug)]
pub struct DeletionResolver<'a> {
    tree: &'a ProjectTree,
    memo: HashMap<&'a str, bool>,
}

impl<'a> DeletionResolver<'a> {
    /// Create a resolver over `tree`.
    pub fn new(tree: &'a ProjectTree) -> Self {
        Self {
            tree,
            memo: HashMap::new(),
        }
    }

    /// Check whether a directory is effectively deleted.
    pub fn is_directory_deleted(&mut self, id: &'a str) -> Result<bool> {
        let tree = self.tree;
        let mut chain: Vec<&'a str> = Vec::new();
        let mut current = Some(id);
        let mut verdict = false;

        while let Some(dir_id) = current {
            if let Some(&known) = self.memo.get(dir_id) {
                verdict = known;
                break;
            }
            if chain.len() >= tree.directory_count() {
                return Err(cycle_error(id));
            }
            let dir = tree.directory(dir_id).ok_or_else(|| match chain.last() {
                Some(child) => dangling_parent_error(child, dir_id),
                None => PausepointError::inconsistent(dir_id, "unknown directory"),
            })?;
            chain.push(dir_id);
            if dir.is_deleted {
                verdict = true;
                break;
            }
            current = dir.parent_id.as_deref();
        }

        // Every node on the walked chain sits below the node that decided
        // the verdict, so they all share it.
        for dir_id in chain {
            self.memo.insert(dir_id, verdict);
        }
        Ok(verdict)
    }

    /// Check whether a file is effectively deleted.
    pub fn is_file_deleted(&mut self, file: &'a File) -> Result<bool> {
        if file.is_deleted {
            return Ok(true);
        }
        if self.tree.directory(&file.parent_id).is_none() {
            return Err(dangling_parent_error(&file.id, &file.parent_id));
        }
        self.is_directory_deleted(&file.parent_id)
    }

    /// Number of directories with a memoized verdict.
    pub fn resolved_count(&self) -> usize {
        self.memo.len()
    }
}

fn dangling_parent_error(child: &str, parent_id: &str) -> PausepointError {
    PausepointError::inconsistent(
        child,
        format!("parent directory '{}' is not in the tree", parent_id),
    )
}

fn cycle_error(node: &str) -> PausepointError {
    PausepointError::inconsistent(node, "parent chain does not terminate at a root")
}
