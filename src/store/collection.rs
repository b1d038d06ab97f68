//! JSON-backed collection documents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use super::layout::StoreLayout;
use crate::error::{PausepointError, Result};

/// How a write replaces the previous document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite the document in place. A crash mid-write can truncate it.
    InPlace,
    /// Write a uniquely named temp file in the namespace directory, then
    /// rename it over the document.
    #[default]
    Atomic,
}

/// A single JSON document bound to `(root, namespace, name)`.
///
/// The store is schema-less: the value type is chosen per call, and a write
/// always replaces the whole document. The namespace directory is created on
/// the first write.
#[derive(Debug, Clone)]
pub struct CollectionStore {
    namespace: String,
    name: String,
    path: PathBuf,
    mode: WriteMode,
}

impl CollectionStore {
    /// Bind a store to a document address.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAddress` if `namespace` or `name` is not a plain
    /// path segment.
    pub fn open(layout: &StoreLayout, namespace: &str, name: &str) -> Result<Self> {
        let path = layout.resolve(namespace, name)?;
        Ok(Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            path,
            mode: WriteMode::default(),
        })
    }

    /// Use a different write mode.
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Get the resolved document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the namespace segment.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the document name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the write mode.
    pub fn write_mode(&self) -> WriteMode {
        self.mode
    }

    /// Check whether the document has been written.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and deserialize the document.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the document was never written
    /// - `EmptyDocument` if it holds zero bytes
    /// - `InvalidFormat` if it is not valid JSON, or not a valid `T`
    /// - `Io` for any other storage failure
    pub fn read<T: DeserializeOwned>(&self) -> Result<T> {
        let bytes = self.read_bytes()?;
        serde_json::from_slice(&bytes).map_err(|e| PausepointError::InvalidFormat {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Read the document as an untyped JSON value.
    pub fn read_value(&self) -> Result<serde_json::Value> {
        self.read()
    }

    /// Replace the document with the JSON serialization of `value`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` if `value` cannot be represented as JSON, and
    /// `Io` if the directory or file cannot be written.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_vec(value).map_err(|e| PausepointError::InvalidFormat {
            path: self.path.clone(),
            message: format!("Failed to serialize value: {}", e),
        })?;

        let parent = self.namespace_dir();
        fs::create_dir_all(parent)?;

        match self.mode {
            WriteMode::InPlace => fs::write(&self.path, &json)?,
            WriteMode::Atomic => {
                // One temp file per write; no two writers share a path.
                let mut temp = NamedTempFile::new_in(parent)?;
                temp.write_all(&json)?;
                temp.flush()?;
                temp.persist(&self.path).map_err(|e| e.error)?;
            }
        }

        debug!(
            namespace = %self.namespace,
            name = %self.name,
            bytes = json.len(),
            "wrote collection document"
        );
        Ok(())
    }

    fn read_bytes(&self) -> Result<Vec<u8>> {
        let bytes = fs::read(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PausepointError::NotFound {
                    path: self.path.clone(),
                }
            } else {
                PausepointError::Io(e)
            }
        })?;

        if bytes.is_empty() {
            return Err(PausepointError::EmptyDocument {
                path: self.path.clone(),
            });
        }

        debug!(
            namespace = %self.namespace,
            name = %self.name,
            bytes = bytes.len(),
            "read collection document"
        );
        Ok(bytes)
    }

    fn namespace_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}
