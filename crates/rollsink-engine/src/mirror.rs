//! Best-effort side sinks
//!
//! The console mirror copies rendered records to stdout in debug mode. The
//! failure mirror reports dropped records and caller misuse on stderr, where
//! they stay visible even when the file sink is the thing that broke.
//! Neither ever returns an error: a failing mirror is ignored.

use rollsink_core::ExError;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Console copy of every record, serialized by its own lock
pub struct ConsoleMirror {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleMirror {
    pub fn to_writer(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Write one complete line; the lock keeps lines from interleaving
    pub fn write_line(&self, line: &str) {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = sink.write_all(line.as_bytes());
        let _ = sink.flush();
    }
}

impl std::fmt::Debug for ConsoleMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleMirror").finish_non_exhaustive()
    }
}

/// Fallback channel for errors the file sink cannot carry
#[derive(Debug, Clone, Copy)]
pub struct FailureMirror {
    enabled: bool,
}

impl FailureMirror {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Report `err` on stderr and as a `tracing` error event
    pub fn report(&self, title: &str, err: &ExError) {
        if !self.enabled {
            return;
        }
        report_to_stderr(title, err);
        tracing::error!(
            component = module_path!(),
            op = err.op().unwrap_or("log"),
            err_kind = ?err.kind(),
            err_code = err.code(),
            title = title,
            error = %err,
            "record dropped"
        );
    }
}

/// Write `<!> Error: ...` to stderr, ignoring failures
pub fn report_to_stderr(title: &str, err: &ExError) {
    let _ = writeln!(io::stderr().lock(), "{}", fallback_line(title, err));
}

fn fallback_line(title: &str, err: &ExError) -> String {
    format!("<!> Error: [{}] {}", title, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollsink_core::RollsinkError;
    use std::sync::Arc;

    /// Shared in-memory sink
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_lines_stay_whole_under_contention() {
        let buffer = Buffer::default();
        let mirror = Arc::new(ConsoleMirror::to_writer(Box::new(buffer.clone())));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let mirror = mirror.clone();
                std::thread::spawn(move || {
                    for i in 0..100 {
                        mirror.write_line(&format!("thread {} line {}\n", t, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let text = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text.lines().count(), 400);
        assert!(text.lines().all(|l| l.starts_with("thread ")));
    }

    #[test]
    fn test_fallback_line_format() {
        let err: ExError = RollsinkError::LoggerNotInitialized.into();
        let line = fallback_line("Main", &err);
        assert!(line.starts_with("<!> Error: [Main] [ERR_LOGGER_NOT_INITIALIZED]"));
    }

    #[test]
    fn test_disabled_failure_mirror() {
        let mirror = FailureMirror::new(false);
        assert!(!mirror.is_enabled());
        let err: ExError = RollsinkError::LoggerNotInitialized.into();
        mirror.report("t", &err);
    }
}
