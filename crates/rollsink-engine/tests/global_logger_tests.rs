//! The global logger is process-wide, so this binary holds a single test
//! that walks through its whole lifecycle.

use rollsink_core_types::ActivityId;
use rollsink_engine::activity;
use rollsink_engine::{
    log_critical, log_info, log_warning, ExErrorKind, LoggerConfiguration, Severity,
};
use rollsink_store::naming::list_session_files;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_global_logger_lifecycle() {
    let temp = TempDir::new().unwrap();

    // Before initialize: free functions report misuse
    assert!(!rollsink_engine::is_initialized());
    let err = rollsink_engine::log(Severity::Info, None, "Early", "dropped").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::LoggerNotInitialized);
    log_critical!("Early", "critical is allowed before {}", "initialize");

    // Initialize once
    let config = LoggerConfiguration::production()
        .with_component_name("global")
        .with_logs_directory(temp.path());
    rollsink_engine::initialize(Some(config.clone())).unwrap();
    assert!(rollsink_engine::is_initialized());
    let err = rollsink_engine::initialize(Some(config)).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::LoggerAlreadyInitialized);

    // Macros capture the call site and format the message
    log_warning!("Main", "Hello World! {}, {}", 45, 37 + 2);
    let activity_id = ActivityId::new();
    activity::scope(activity_id.clone(), || {
        log_info!("Job", "step {}", 1);
    });
    rollsink_engine::flush();

    let session = rollsink_engine::Logger::global().session().unwrap();
    let files = list_session_files(session.directory(), session.id()).unwrap();
    let text = fs::read_to_string(&files[0].1).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("global_logger_tests.rs, Function=global_logger_tests, Line="));
    assert!(lines[0].ends_with("<Warning> [Main] Hello World! 45, 39"));
    assert!(lines[1].contains(&format!("ActivityID={}", activity_id)));
    assert!(lines[1].ends_with("<Info> [Job] step 1"));
}
