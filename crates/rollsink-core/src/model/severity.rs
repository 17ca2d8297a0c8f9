use serde::{Deserialize, Serialize};

/// Label used for any raw severity value outside the known set
pub const UNKNOWN_SEVERITY_LABEL: &str = "Unknown";

/// Ordered severity of a log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    /// Actions occurring in the system, mostly for debugging
    Info = 0,
    /// Non-error events that need attention
    Warning = 1,
    /// A failed action
    Error = 2,
    /// Failures that may bring the system down
    Critical = 3,
}

impl Severity {
    /// Text label written into record lines
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Critical => "Critical",
        }
    }

    /// Map a raw wire value back to a severity
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Severity::Info),
            1 => Some(Severity::Warning),
            2 => Some(Severity::Error),
            3 => Some(Severity::Critical),
            _ => None,
        }
    }

    /// Label for a raw value; total over `u8`, out-of-range values map to
    /// [`UNKNOWN_SEVERITY_LABEL`]
    pub fn label_for_raw(raw: u8) -> &'static str {
        Self::from_raw(raw)
            .map(|severity| severity.label())
            .unwrap_or(UNKNOWN_SEVERITY_LABEL)
    }

    pub fn as_raw(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
