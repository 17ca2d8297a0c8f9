//! Canonical schema constants for internal diagnostics
//!
//! rollsink reports its own behavior (rotations, dropped records, mirror
//! failures) through `tracing` events. These constants keep the field keys
//! and event names of those events consistent.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Session and rotation
pub const FIELD_SESSION_ID: &str = "session_id";
pub const FIELD_SESSION_DIR: &str = "session_dir";
pub const FIELD_FILE_INDEX: &str = "file_index";
pub const FIELD_ATTEMPTS: &str = "attempts";
pub const FIELD_DROPPED: &str = "dropped";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_ROTATED: &str = "rotated";
pub const EVENT_DROPPED: &str = "dropped";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        // Verify all constants are non-empty
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_SESSION_ID.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_ROTATED.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        let names = [
            EVENT_START,
            EVENT_END,
            EVENT_END_ERROR,
            EVENT_ROTATED,
            EVENT_DROPPED,
        ];
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
