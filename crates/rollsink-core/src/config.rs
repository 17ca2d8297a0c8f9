//! Logger configuration
//!
//! A `LoggerConfiguration` is an immutable snapshot read once when the
//! logger is initialized. It can be built in code (`Default`, `production()`
//! and the `with_*` builders) or loaded from TOML; every field is optional in
//! TOML and falls back to its default.

use crate::errors::{ExError, RollsinkError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Component name used when none is configured
pub const DEFAULT_COMPONENT_NAME: &str = "rollsink";

/// Size ceiling of a single log file (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Outer incremental-search attempts per write
pub const DEFAULT_MAX_SEARCH_ATTEMPTS: u32 = 5;

/// Inner append attempts per pointed-at file
pub const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 10;

/// Async drain period
pub const DEFAULT_FLUSH_FREQUENCY_MS: u32 = 1_000;

/// Records held by the async queue before the oldest are dropped
pub const DEFAULT_ASYNC_QUEUE_CAPACITY: usize = 8_192;

/// Limits governing file rollover and retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationPolicy {
    pub max_file_size_bytes: u64,
    pub max_search_attempts: u32,
    pub max_write_attempts: u32,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_search_attempts: DEFAULT_MAX_SEARCH_ATTEMPTS,
            max_write_attempts: DEFAULT_MAX_WRITE_ATTEMPTS,
        }
    }
}

impl RotationPolicy {
    pub fn with_max_file_size_bytes(mut self, bytes: u64) -> Self {
        self.max_file_size_bytes = bytes;
        self
    }

    pub fn with_max_search_attempts(mut self, attempts: u32) -> Self {
        self.max_search_attempts = attempts;
        self
    }

    pub fn with_max_write_attempts(mut self, attempts: u32) -> Self {
        self.max_write_attempts = attempts;
        self
    }

    /// Whether a file of `current_size` bytes may take `record_len` more
    ///
    /// An empty file always accepts, so a record larger than the ceiling
    /// still lands somewhere instead of rotating forever.
    pub fn accepts(&self, current_size: u64, record_len: u64) -> bool {
        current_size == 0 || current_size.saturating_add(record_len) <= self.max_file_size_bytes
    }

    fn validate(&self) -> Result<(), RollsinkError> {
        if self.max_file_size_bytes == 0 {
            return Err(invalid("rotation.max_file_size_bytes must be greater than zero"));
        }
        if self.max_search_attempts == 0 {
            return Err(invalid("rotation.max_search_attempts must be greater than zero"));
        }
        if self.max_write_attempts == 0 {
            return Err(invalid("rotation.max_write_attempts must be greater than zero"));
        }
        Ok(())
    }
}

/// Startup options for the logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfiguration {
    /// Mirror every record to stdout. Serialized by a dedicated lock, so it
    /// costs throughput under contention; keep it for debugging.
    pub debug_mode_enabled: bool,
    /// Report dropped records and misuse on the failure mirror
    pub log_to_syslog_on_failure: bool,
    /// Queue records and write them from a background worker
    pub async_mode_enabled: bool,
    /// Stamp records in UTC instead of local time
    pub utc_enabled: bool,
    /// Names the session directory
    pub component_name: String,
    /// Root under which the session directory is created
    pub logs_directory_path: PathBuf,
    /// Async drain period; ignored in sync mode
    pub flush_frequency_ms: u32,
    /// Write File/Function/Line into each record
    pub include_source_location: bool,
    /// Async queue bound; ignored in sync mode
    pub async_queue_capacity: usize,
    pub rotation: RotationPolicy,
}

impl Default for LoggerConfiguration {
    fn default() -> Self {
        Self {
            debug_mode_enabled: true,
            log_to_syslog_on_failure: true,
            async_mode_enabled: false,
            utc_enabled: true,
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
            logs_directory_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            flush_frequency_ms: DEFAULT_FLUSH_FREQUENCY_MS,
            include_source_location: true,
            async_queue_capacity: DEFAULT_ASYNC_QUEUE_CAPACITY,
            rotation: RotationPolicy::default(),
        }
    }
}

impl LoggerConfiguration {
    /// Defaults with the console mirror switched off
    pub fn production() -> Self {
        Self {
            debug_mode_enabled: false,
            ..Self::default()
        }
    }

    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode_enabled = enabled;
        self
    }

    pub fn with_log_to_syslog_on_failure(mut self, enabled: bool) -> Self {
        self.log_to_syslog_on_failure = enabled;
        self
    }

    pub fn with_async_mode(mut self, enabled: bool) -> Self {
        self.async_mode_enabled = enabled;
        self
    }

    pub fn with_utc(mut self, enabled: bool) -> Self {
        self.utc_enabled = enabled;
        self
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = name.into();
        self
    }

    pub fn with_logs_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.logs_directory_path = path.into();
        self
    }

    pub fn with_flush_frequency_ms(mut self, ms: u32) -> Self {
        self.flush_frequency_ms = ms;
        self
    }

    pub fn with_source_location(mut self, enabled: bool) -> Self {
        self.include_source_location = enabled;
        self
    }

    pub fn with_async_queue_capacity(mut self, capacity: usize) -> Self {
        self.async_queue_capacity = capacity;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    /// Parse a TOML document and validate the result
    pub fn from_toml_str(text: &str) -> Result<Self, ExError> {
        let config: Self = toml::from_str(text).map_err(|e| invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self, ExError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            RollsinkError::ConfigurationUnreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the snapshot before an engine is built from it
    pub fn validate(&self) -> Result<(), ExError> {
        if self.component_name.trim().is_empty() {
            return Err(invalid("component_name must not be empty").into());
        }
        if self
            .component_name
            .contains(|c: char| std::path::is_separator(c) || c == '\0')
        {
            return Err(invalid("component_name must not contain path separators").into());
        }
        self.rotation.validate()?;
        if self.async_mode_enabled {
            if self.flush_frequency_ms == 0 {
                return Err(invalid("flush_frequency_ms must be greater than zero in async mode").into());
            }
            if self.async_queue_capacity == 0 {
                return Err(invalid("async_queue_capacity must be greater than zero in async mode").into());
            }
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> RollsinkError {
    RollsinkError::InvalidConfiguration {
        reason: reason.into(),
    }
}
