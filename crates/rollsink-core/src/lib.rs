//! rollsink Core - record model, configuration and error facility
//!
//! This crate provides the pieces shared by the file writer and the logging
//! engine:
//! - `Severity`, `CallSite` and `LogRecord` with its single-line rendering
//! - Per-thread activity tracking
//! - `LoggerConfiguration` and `RotationPolicy`, loadable from TOML
//! - The structured error facility (`ExError`, `ExErrorKind`, `RollsinkError`)
//! - Internal diagnostics on top of `tracing`

pub mod activity;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use config::{LoggerConfiguration, RotationPolicy};
pub use errors::{ExError, ExErrorKind, Result, RollsinkError};
pub use model::{CallSite, Clock, LogRecord, Severity};
