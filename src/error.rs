//! Error types for Pausepoint operations.
//!
//! This module defines [`PausepointError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PausepointError` for failures the caller must tell apart
//!   ("never saved" vs "corrupt" vs "tree inconsistent")
//! - Use `anyhow::Error` (via `PausepointError::Other`) for unexpected errors
//! - Nothing is retried internally; every failure propagates

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Pausepoint operations.
#[derive(Debug, Error)]
pub enum PausepointError {
    /// Document (or explicit config file) has never been written.
    #[error("Document not found: {path}")]
    NotFound { path: PathBuf },

    /// Document exists but holds zero bytes.
    #[error("Document is empty: {path}")]
    EmptyDocument { path: PathBuf },

    /// Document content is not valid JSON for the requested value.
    #[error("Invalid document format at {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    /// The project tree handed to the exporter is corrupt.
    #[error("Inconsistent project tree at '{node}': {message}")]
    InconsistentState { node: String, message: String },

    /// A namespace or document name cannot be used as a path segment.
    #[error("Invalid store address segment '{segment}': {reason}")]
    InvalidAddress { segment: String, reason: String },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Archive container failure not caused by I/O.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse failure classes a caller reacts to differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Nothing was ever saved at the address.
    NeverSaved,
    /// Something was saved but cannot be loaded.
    Corrupt,
    /// The upstream tree violates its invariants.
    TreeInconsistent,
    /// Storage medium failure.
    Io,
    /// Configuration, addressing, or anything else.
    Other,
}

impl PausepointError {
    /// Classify this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound { .. } => FailureKind::NeverSaved,
            Self::EmptyDocument { .. } | Self::InvalidFormat { .. } => FailureKind::Corrupt,
            Self::InconsistentState { .. } => FailureKind::TreeInconsistent,
            Self::Io(_) => FailureKind::Io,
            Self::Archive(zip::result::ZipError::Io(_)) => FailureKind::Io,
            _ => FailureKind::Other,
        }
    }

    pub(crate) fn inconsistent(node: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InconsistentState {
            node: node.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for Pausepoint operations.
pub type Result<T> = std::result::Result<T, PausepointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_displays_path() {
        let err = PausepointError::NotFound {
            path: PathBuf::from("/proj/.pausepoint/tags/all.json"),
        };
        assert!(err.to_string().contains("/proj/.pausepoint/tags/all.json"));
    }

    #[test]
    fn invalid_format_displays_path_and_message() {
        let err = PausepointError::InvalidFormat {
            path: PathBuf::from("/doc.json"),
            message: "expected value at line 1".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/doc.json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn inconsistent_state_displays_node() {
        let err = PausepointError::inconsistent("file-7", "missing content");
        let msg = err.to_string();
        assert!(msg.contains("file-7"));
        assert!(msg.contains("missing content"));
    }

    #[test]
    fn kinds_separate_never_saved_from_corrupt() {
        let never = PausepointError::NotFound {
            path: PathBuf::from("a"),
        };
        let empty = PausepointError::EmptyDocument {
            path: PathBuf::from("a"),
        };
        let garbled = PausepointError::InvalidFormat {
            path: PathBuf::from("a"),
            message: "x".into(),
        };
        assert_eq!(never.kind(), FailureKind::NeverSaved);
        assert_eq!(empty.kind(), FailureKind::Corrupt);
        assert_eq!(garbled.kind(), FailureKind::Corrupt);
        assert_eq!(
            PausepointError::inconsistent("d", "x").kind(),
            FailureKind::TreeInconsistent
        );
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PausepointError = io_err.into();
        assert!(matches!(err, PausepointError::Io(_)));
        assert_eq!(err.kind(), FailureKind::Io);
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PausepointError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
