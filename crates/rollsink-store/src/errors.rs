//! Error handling for rollsink-store
//!
//! Wraps rollsink-core ExError with store-specific helpers

use rollsink_core::errors::{ExError, ExErrorKind, RollsinkError};
use std::io;
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a directory creation error
pub fn directory_creation_failed(path: &Path, err: &io::Error) -> ExError {
    RollsinkError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
    .into()
}

/// Create a file write error
pub fn file_write_failed(path: &Path, reason: impl std::fmt::Display) -> ExError {
    RollsinkError::FileWriteFailed {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
    .into()
}

/// Create an incremental search exhaustion error carrying the last failure
pub fn search_exhausted(attempts: u32, last_path: &Path, last_error: &ExError) -> ExError {
    RollsinkError::IncrementalSearchExhausted {
        attempts,
        last_path: last_path.to_path_buf(),
        reason: last_error.message().to_string(),
    }
    .into()
}

/// Create an IO error
pub fn io_error(operation: &str, err: &io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
