//! On-disk layout for collection documents.

use std::path::{Path, PathBuf};

use crate::error::{PausepointError, Result};

/// Default name of the hidden directory that holds all collections.
pub const DEFAULT_MARKER: &str = ".pausepoint";

/// Maps `(namespace, name)` pairs to document paths under a project root.
///
/// Documents live at `<root>/<marker>/<namespace>/<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLayout {
    root: PathBuf,
    marker: String,
}

impl StoreLayout {
    /// Create a layout using the default marker directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_marker(root, DEFAULT_MARKER)
    }

    /// Create a layout with a custom marker directory name.
    pub fn with_marker(root: impl Into<PathBuf>, marker: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            marker: marker.into(),
        }
    }

    /// Get the project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the marker directory name.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Directory holding every namespace.
    pub fn marker_dir(&self) -> PathBuf {
        self.root.join(&self.marker)
    }

    /// Directory holding one namespace's documents.
    pub fn namespace_dir(&self, namespace: &str) -> PathBuf {
        self.marker_dir().join(namespace)
    }

    /// Resolve a document address, validating both segments.
    pub fn resolve(&self, namespace: &str, name: &str) -> Result<PathBuf> {
        validate_segment(namespace)?;
        validate_segment(name)?;
        Ok(self.namespace_dir(namespace).join(name))
    }
}

/// Check that a namespace or document name is a single plain path segment.
pub fn validate_segment(segment: &str) -> Result<()> {
    let reason = if segment.is_empty() {
        Some("must not be empty")
    } else if segment == "." || segment == ".." {
        Some("must not be a relative directory reference")
    } else if segment.contains('/') || segment.contains('\\') {
        Some("must not contain a path separator")
    } else if segment.contains('\0') {
        Some("must not contain NUL")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(PausepointError::InvalidAddress {
            segment: segment.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
