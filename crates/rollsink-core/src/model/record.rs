use crate::activity;
use crate::model::{CallSite, Severity};
use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use rollsink_core_types::{ActivityId, SessionId};
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_NUMBER: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_NUMBER: u64 = NEXT_THREAD_NUMBER.fetch_add(1, Ordering::Relaxed);
}

/// Process-unique number of the calling thread
///
/// Assigned on the first call from each thread and stable for the thread's
/// lifetime. Numbers are never reused within a process.
pub fn current_thread_number() -> u64 {
    THREAD_NUMBER.with(|number| *number)
}

/// Clock used to stamp records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Clock {
    #[default]
    Utc,
    Local,
}

impl Clock {
    pub fn from_utc_flag(utc_enabled: bool) -> Self {
        if utc_enabled {
            Clock::Utc
        } else {
            Clock::Local
        }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            Clock::Utc => Utc::now().into(),
            Clock::Local => Local::now().into(),
        }
    }
}

/// A single log record
///
/// Captured on the calling thread (timestamp, thread, process and activity
/// are taken at construction) and immutable afterwards. Rendering produces
/// exactly one newline-terminated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: DateTime<FixedOffset>,
    severity: Severity,
    thread_id: u64,
    process_id: u32,
    activity_id: ActivityId,
    session_id: SessionId,
    call_site: Option<CallSite>,
    title: String,
    message: String,
}

impl LogRecord {
    /// Capture a record for the calling thread
    pub fn capture(
        session_id: &SessionId,
        clock: Clock,
        severity: Severity,
        call_site: Option<CallSite>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: clock.now(),
            severity,
            thread_id: current_thread_number(),
            process_id: std::process::id(),
            activity_id: activity::current(),
            session_id: session_id.clone(),
            call_site,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Replace the captured timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn thread_id(&self) -> u64 {
        self.thread_id
    }

    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    pub fn activity_id(&self) -> &ActivityId {
        &self.activity_id
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn call_site(&self) -> Option<&CallSite> {
        self.call_site.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render the on-disk line
    ///
    /// Call-site fields appear only when `include_call_site` is set and the
    /// record carries a call site.
    pub fn render(&self, include_call_site: bool) -> String {
        let mut line = String::with_capacity(160 + self.title.len() + self.message.len());

        // Writing into a String cannot fail.
        let _ = write!(
            line,
            "[{}] ({}) PID={}, TID={}, ActivityID={}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.session_id,
            self.process_id,
            self.thread_id,
            self.activity_id,
        );

        if let Some(site) = self.call_site.filter(|_| include_call_site) {
            let _ = write!(
                line,
                ", File={}, Function={}, Line={}",
                site.file(),
                site.function(),
                site.line()
            );
        }

        let _ = writeln!(
            line,
            ". <{}> [{}] {}",
            self.severity.label(),
            escape_line_breaks(&self.title),
            escape_line_breaks(&self.message),
        );

        line
    }
}

/// Keep one record per line
///
/// Backslashes are doubled as well, so an escaped line break never collides
/// with a literal `\n` already in the text.
fn escape_line_breaks(text: &str) -> std::borrow::Cow<'_, str> {
    if !text.contains(['\\', '\n', '\r']) {
        return std::borrow::Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    std::borrow::Cow::Owned(escaped)
}
