//! Internal diagnostics for rollsink
//!
//! rollsink reports its own behavior (session start, rotations, dropped
//! records, failure-mirror output) as `tracing` events. Hosts that do not
//! install a subscriber of their own can use `init(profile)`.
//!
//! # Usage
//!
//! ```rust
//! use rollsink_core::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
