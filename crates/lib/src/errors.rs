//! Error types for livetree operations.
//!
//! Navigation, dispatch and import failures are returned as data. The three
//! navigation/dispatch kinds are kept distinct so callers can match on them:
//!
//! - [`Error::MissingPath`] - a read walked off the end of the stored data
//! - [`Error::UnknownOperation`] - dispatch could not resolve a name
//! - [`Error::OperationFailed`] - a resolved operation failed while running

use thiserror::Error;

/// Result type used throughout the livetree library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the livetree library.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// A segment of the requested path does not exist and no default was given
    #[error("Path not found: {path}")]
    MissingPath { path: String },

    /// No stored callable or registered extension answers to this name
    #[error("Unknown or non-callable operation: {name}")]
    UnknownOperation { name: String },

    /// A resolved operation failed; the underlying cause is intentionally dropped
    #[error("Operation failed: {name}")]
    OperationFailed { name: String },

    /// The container has no entries to report on
    #[error("Container is empty: {path}")]
    EmptyContainer { path: String },

    /// An append found the largest possible index already in use
    #[error("No free index to append at: {path}")]
    IndexExhausted { path: String },

    /// A stored value does not have the requested type
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Imported data has a non-container root
    #[error("Expected a container, found {found}")]
    NotAContainer { found: String },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Check if this error reports a missing path
    pub fn is_missing_path(&self) -> bool {
        matches!(self, Error::MissingPath { .. })
    }

    /// Check if this error reports an unresolvable operation name
    pub fn is_unknown_operation(&self) -> bool {
        matches!(self, Error::UnknownOperation { .. })
    }

    /// Check if this error reports a failure inside a resolved operation
    pub fn is_operation_failed(&self) -> bool {
        matches!(self, Error::OperationFailed { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// Check if this error indicates something was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::MissingPath { .. } | Error::UnknownOperation { .. } | Error::EmptyContainer { .. }
        )
    }

    /// Get the path if this is a path-related error
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::MissingPath { path }
            | Error::EmptyContainer { path }
            | Error::IndexExhausted { path } => Some(path),
            _ => None,
        }
    }

    /// Get the operation name if this is a dispatch error
    pub fn operation(&self) -> Option<&str> {
        match self {
            Error::UnknownOperation { name } | Error::OperationFailed { name } => Some(name),
            _ => None,
        }
    }
}
