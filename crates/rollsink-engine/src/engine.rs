//! Logging engine
//!
//! One engine is one session: it owns the session id, the session directory
//! and the rotating writer. `log` renders the record, mirrors it to the
//! console in debug mode and hands it to the sync or async write path. It
//! never reports a failed write to its caller.

use crate::dispatcher::AsyncDispatcher;
use crate::mirror::{ConsoleMirror, FailureMirror};
use rollsink_core::{
    log_op_end, log_op_error, log_op_start, CallSite, Clock, ExError, LogRecord,
    LoggerConfiguration, Severity,
};
use rollsink_core_types::SessionId;
use rollsink_store::{naming, FileWriter, LogFileSystem, StdFileSystem};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Identity of a running session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    id: SessionId,
    directory: PathBuf,
    component_name: String,
}

impl SessionInfo {
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Absolute session directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn component_name(&self) -> &str {
        &self.component_name
    }
}

#[derive(Debug)]
pub struct LoggingEngine {
    session: SessionInfo,
    clock: Clock,
    include_call_site: bool,
    console: Option<ConsoleMirror>,
    failures: FailureMirror,
    writer: Arc<FileWriter>,
    dispatcher: Option<AsyncDispatcher>,
}

impl LoggingEngine {
    /// Start a session on the real filesystem, echoing to stdout in debug mode
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` for a rejected snapshot, `DirectoryCreationFailed`
    /// when the session directory cannot be created.
    pub fn new(config: &LoggerConfiguration) -> Result<Self, ExError> {
        Self::with_sinks(
            config,
            Arc::new(StdFileSystem),
            Box::new(std::io::stdout()),
        )
    }

    /// Start a session with an explicit filesystem and console sink
    ///
    /// # Errors
    ///
    /// Same as [`LoggingEngine::new`].
    pub fn with_sinks(
        config: &LoggerConfiguration,
        fs: Arc<dyn LogFileSystem>,
        console: Box<dyn Write + Send>,
    ) -> Result<Self, ExError> {
        let start = Instant::now();
        log_op_start!("open_session", component_name = %config.component_name);

        let result = Self::open(config, fs, console);
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(engine) => log_op_end!(
                "open_session",
                duration_ms = duration_ms,
                session_id = %engine.session.id,
                session_dir = %engine.session.directory.display()
            ),
            Err(err) => log_op_error!("open_session", err.clone(), duration_ms = duration_ms),
        }
        result
    }

    fn open(
        config: &LoggerConfiguration,
        fs: Arc<dyn LogFileSystem>,
        console: Box<dyn Write + Send>,
    ) -> Result<Self, ExError> {
        config.validate()?;

        let session_id = SessionId::new();
        let directory = naming::session_directory(
            &config.logs_directory_path,
            &config.component_name,
            &session_id,
        )?;

        let writer = Arc::new(FileWriter::with_file_system(
            session_id.clone(),
            directory.clone(),
            config.rotation,
            fs,
        ));
        writer.ensure_directory()?;

        let failures = FailureMirror::new(config.log_to_syslog_on_failure);
        let dispatcher = if config.async_mode_enabled {
            Some(AsyncDispatcher::start(
                writer.clone(),
                config.async_queue_capacity,
                Duration::from_millis(u64::from(config.flush_frequency_ms)),
                failures,
            )?)
        } else {
            None
        };

        Ok(Self {
            session: SessionInfo {
                id: session_id,
                directory,
                component_name: config.component_name.clone(),
            },
            clock: Clock::from_utc_flag(config.utc_enabled),
            include_call_site: config.include_source_location,
            console: config
                .debug_mode_enabled
                .then(|| ConsoleMirror::to_writer(console)),
            failures,
            writer,
            dispatcher,
        })
    }

    pub fn session(&self) -> &SessionInfo {
        &self.session
    }

    pub fn writer(&self) -> &FileWriter {
        &self.writer
    }

    pub fn is_async(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Render and write one record
    pub fn log(
        &self,
        severity: Severity,
        call_site: Option<CallSite>,
        title: &str,
        message: &str,
    ) {
        let record = LogRecord::capture(
            &self.session.id,
            self.clock,
            severity,
            call_site,
            title,
            message,
        );
        let line = record.render(self.include_call_site);

        if let Some(console) = &self.console {
            console.write_line(&line);
        }

        match &self.dispatcher {
            Some(dispatcher) => dispatcher.enqueue(title, line),
            None => {
                if let Err(err) = self.writer.write(&line) {
                    self.failures.report(title, &err);
                }
            }
        }
    }

    /// Write out queued records; nothing to do in sync mode
    pub fn flush(&self) {
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.flush();
        }
    }
}
