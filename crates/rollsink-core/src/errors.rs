use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling and testing. Kinds fall into three groups: I/O failures in
/// the write path, caller contract violations, and configuration problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExErrorKind {
    // Write path
    DirectoryCreationFailed,
    FileWriteFailed,
    IncrementalSearchExhausted,

    // Caller contract
    LoggerNotInitialized,
    LoggerAlreadyInitialized,

    // Configuration
    InvalidConfiguration,

    // Integration/IO
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::DirectoryCreationFailed => "ERR_DIRECTORY_CREATION_FAILED",
            ExErrorKind::FileWriteFailed => "ERR_FILE_WRITE_FAILED",
            ExErrorKind::IncrementalSearchExhausted => "ERR_INCREMENTAL_SEARCH_EXHAUSTED",
            ExErrorKind::LoggerNotInitialized => "ERR_LOGGER_NOT_INITIALIZED",
            ExErrorKind::LoggerAlreadyInitialized => "ERR_LOGGER_ALREADY_INITIALIZED",
            ExErrorKind::InvalidConfiguration => "ERR_INVALID_CONFIGURATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the kind marks a caller contract violation rather than a
    /// runtime failure
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            ExErrorKind::LoggerNotInitialized | ExErrorKind::LoggerAlreadyInitialized
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, filesystem path, attempt count) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<PathBuf>,
    attempts: Option<u32>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            attempts: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add attempt count context
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = Some(attempts);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the attempt count, if any
    pub fn attempts(&self) -> Option<u32> {
        self.attempts
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(attempts) = self.attempts {
            write!(f, " (attempts: {})", attempts)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for rollsink operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RollsinkError {
    /// Session directory could not be created
    #[error("Failed to create directory {}: {reason}", .path.display())]
    DirectoryCreationFailed { path: PathBuf, reason: String },

    /// A single append to a log file failed
    #[error("Failed to write to file {}: {reason}", .path.display())]
    FileWriteFailed { path: PathBuf, reason: String },

    /// Every rotation attempt failed to land the record
    #[error("Incremental search exhausted after {attempts} attempts, last file {}: {reason}", .last_path.display())]
    IncrementalSearchExhausted {
        attempts: u32,
        last_path: PathBuf,
        reason: String,
    },

    /// Logging was attempted before the logger was initialized
    #[error("Logger is not initialized")]
    LoggerNotInitialized,

    /// A second initialization was attempted
    #[error("Logger is already initialized")]
    LoggerAlreadyInitialized,

    /// Configuration snapshot failed validation or parsing
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Configuration file could not be read
    #[error("Failed to read configuration {}: {reason}", .path.display())]
    ConfigurationUnreadable { path: PathBuf, reason: String },
}

impl From<RollsinkError> for ExError {
    fn from(err: RollsinkError) -> Self {
        match err {
            RollsinkError::DirectoryCreationFailed { path, reason } => {
                ExError::new(ExErrorKind::DirectoryCreationFailed)
                    .with_op("create_session_dir")
                    .with_path(path)
                    .with_message(reason)
            }

            RollsinkError::FileWriteFailed { path, reason } => {
                ExError::new(ExErrorKind::FileWriteFailed)
                    .with_op("append")
                    .with_path(path)
                    .with_message(reason)
            }

            RollsinkError::IncrementalSearchExhausted {
                attempts,
                last_path,
                reason,
            } => ExError::new(ExErrorKind::IncrementalSearchExhausted)
                .with_op("write")
                .with_path(last_path)
                .with_attempts(attempts)
                .with_message(format!(
                    "No writable log file found within the retry limit: {}",
                    reason
                )),

            RollsinkError::LoggerNotInitialized => ExError::new(ExErrorKind::LoggerNotInitialized)
                .with_op("log")
                .with_message("Logger must be initialized before logging"),

            RollsinkError::LoggerAlreadyInitialized => {
                ExError::new(ExErrorKind::LoggerAlreadyInitialized)
                    .with_op("initialize")
                    .with_message("Logger has already been initialized")
            }

            RollsinkError::InvalidConfiguration { reason } => {
                ExError::new(ExErrorKind::InvalidConfiguration)
                    .with_op("validate_config")
                    .with_message(reason)
            }

            RollsinkError::ConfigurationUnreadable { path, reason } => {
                ExError::new(ExErrorKind::Io)
                    .with_op("read_config")
                    .with_path(path)
                    .with_message(reason)
            }
        }
    }
}
