//! Call-site capturing log macros
//!
//! Each macro formats its message, captures `file!()`, `module_path!()` and
//! `line!()` and logs through [`Logger::global`](crate::Logger::global).
//! The result is discarded. Debug builds assert the logger is initialized,
//! except for `log_critical!`.
//!
//! ```no_run
//! use rollsink_engine::{log_info, log_warning};
//!
//! rollsink_engine::initialize(None)?;
//! log_info!("Startup", "listening on port {}", 8080);
//! log_warning!("Main", "Hello World! {}, {}", 45, 37 + 2);
//! # Ok::<(), rollsink_engine::ExError>(())
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __rollsink_log {
    ($severity:expr, $title:expr, $($arg:tt)+) => {{
        let _ = $crate::Logger::global().log(
            $severity,
            ::std::option::Option::Some($crate::call_site!()),
            $title,
            &::std::format!($($arg)+),
        );
    }};
}

#[macro_export]
macro_rules! log_info {
    ($title:expr, $($arg:tt)+) => {{
        debug_assert!($crate::is_initialized(), "rollsink logger is not initialized");
        $crate::__rollsink_log!($crate::Severity::Info, $title, $($arg)+)
    }};
}

#[macro_export]
macro_rules! log_warning {
    ($title:expr, $($arg:tt)+) => {{
        debug_assert!($crate::is_initialized(), "rollsink logger is not initialized");
        $crate::__rollsink_log!($crate::Severity::Warning, $title, $($arg)+)
    }};
}

#[macro_export]
macro_rules! log_error {
    ($title:expr, $($arg:tt)+) => {{
        debug_assert!($crate::is_initialized(), "rollsink logger is not initialized");
        $crate::__rollsink_log!($crate::Severity::Error, $title, $($arg)+)
    }};
}

/// Like [`log_error!`] but usable before initialization
#[macro_export]
macro_rules! log_critical {
    ($title:expr, $($arg:tt)+) => {
        $crate::__rollsink_log!($crate::Severity::Critical, $title, $($arg)+)
    };
}
