//! Patient validation errors
//!
//! A validation error names the first field that broke a constraint.
//! Validation happens before the store is touched, so a rejected
//! record never reaches disk.

use thiserror::Error;

/// A field constraint violation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending field as it appears on the wire
    pub field: &'static str,
    /// Human-readable constraint description
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
