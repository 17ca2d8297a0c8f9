//! Identity types for sessions and activities
//!
//! A `SessionId` names one logging engine lifetime and ends up in every file
//! name and record line of that session. An `ActivityId` tags records that
//! belong to the same unit of work on a thread.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque random token identifying one logging session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new random SessionId using UUIDv4
    ///
    /// Sessions need collision resistance, not ordering, so v4 is used.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization and tests)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a unit of work that spans several records
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityId(String);

impl ActivityId {
    /// Generate a new ActivityId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// The nil activity, used when a thread has not entered any activity
    pub fn nil() -> Self {
        Self(Uuid::nil().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Whether this is the nil activity
    pub fn is_nil(&self) -> bool {
        self.0 == Uuid::nil().to_string()
    }
}

impl Default for ActivityId {
    fn default() -> Self {
        Self::nil()
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
