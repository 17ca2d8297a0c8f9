//! rollsink Engine - the logging engine and its process-facing facade
//!
//! - `LoggingEngine`: one session, sync or async writes, console mirror
//! - `Logger`: initialize-once handle, plus a global instance behind the free
//!   functions and the `log_info!` / `log_warning!` / `log_error!` /
//!   `log_critical!` macros

pub mod dispatcher;
pub mod engine;
pub mod logger;
pub mod macros;
pub mod mirror;

pub use engine::{LoggingEngine, SessionInfo};
pub use logger::{flush, initialize, is_initialized, log, Logger};
pub use rollsink_core::{activity, call_site};
pub use rollsink_core::{CallSite, ExError, ExErrorKind, LoggerConfiguration, RotationPolicy, Severity};
