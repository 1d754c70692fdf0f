//! Store error types
//!
//! Client errors (`NotFound`, `AlreadyExists`, `InvalidArgument`,
//! `Validation`) leave the store file untouched. `Io` and `Corrupt` are
//! unclassified failures of the backing file and are never recovered
//! locally.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::patient::ValidationError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unknown patient id
    #[error("Patient not found: {0}")]
    NotFound(String),

    /// Duplicate id on create
    #[error("Patient already exists: {0}")]
    AlreadyExists(String),

    /// Bad sort field or order
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Field constraint violation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Backing file could not be read or written
    #[error("Store I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Backing file is not a valid patient document
    #[error("Store file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.into(),
            source,
        }
    }

    /// True for failures caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, StoreError::Io { .. } | StoreError::Corrupt { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(StoreError::NotFound("P1".into()).is_client_error());
        assert!(StoreError::AlreadyExists("P1".into()).is_client_error());
        assert!(StoreError::InvalidArgument("x".into()).is_client_error());
        assert!(StoreError::from(ValidationError::new("age", "too old")).is_client_error());

        let io_err = StoreError::io(
            "patients.json",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(!io_err.is_client_error());
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let err = StoreError::io(
            "/tmp/patients.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let display = err.to_string();
        assert!(display.contains("/tmp/patients.json"));
        assert!(display.contains("denied"));
    }
}
