//! Rotating file writer
//!
//! `FileWriter::write` runs two nested, count-bounded loops:
//!
//! - the incremental search decides *which* file to write to. It creates the
//!   pointed-at file when missing and checks its size against the ceiling;
//! - the write-attempt loop retries appends to that one file.
//!
//! When a file is full, cannot be sized or keeps rejecting appends, the
//! pointer advances to the next index. The rotation lock covers only that
//! pointer update, never I/O.
//!
//! One session directory belongs to one process. Nothing here coordinates
//! writers in different processes.

use crate::errors::{directory_creation_failed, file_write_failed, search_exhausted, Result};
use crate::fs::{LogFileSystem, StdFileSystem};
use crate::naming::log_file_path;
use rollsink_core::RotationPolicy;
use rollsink_core_types::schema::{EVENT_END_ERROR, EVENT_ROTATED};
use rollsink_core_types::SessionId;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Pointer to the file currently receiving records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationState {
    index: u64,
    path: PathBuf,
}

impl RotationState {
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Appends rendered records to the session's rotating log files
#[derive(Debug)]
pub struct FileWriter {
    session_id: SessionId,
    session_dir: PathBuf,
    policy: RotationPolicy,
    fs: Arc<dyn LogFileSystem>,
    state: Mutex<RotationState>,
}

impl FileWriter {
    /// Writer over the real filesystem, pointing at index 0
    pub fn new(session_id: SessionId, session_dir: PathBuf, policy: RotationPolicy) -> Self {
        Self::with_file_system(session_id, session_dir, policy, Arc::new(StdFileSystem))
    }

    pub fn with_file_system(
        session_id: SessionId,
        session_dir: PathBuf,
        policy: RotationPolicy,
        fs: Arc<dyn LogFileSystem>,
    ) -> Self {
        let state = RotationState {
            index: 0,
            path: log_file_path(&session_dir, &session_id, 0),
        };
        Self {
            session_id,
            session_dir,
            policy,
            fs,
            state: Mutex::new(state),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    pub fn current_file_index(&self) -> u64 {
        self.lock_state().index
    }

    pub fn current_file_path(&self) -> PathBuf {
        self.lock_state().path.clone()
    }

    /// Create the session directory if it is missing
    ///
    /// Not retried: directory creation either works or keeps failing.
    pub fn ensure_directory(&self) -> Result<()> {
        if self.fs.dir_exists(&self.session_dir) {
            return Ok(());
        }
        self.fs
            .create_dir_all(&self.session_dir)
            .map_err(|e| directory_creation_failed(&self.session_dir, &e))
    }

    /// Append one rendered record
    ///
    /// Returns `DirectoryCreationFailed` when the session directory cannot be
    /// created, and `IncrementalSearchExhausted` after
    /// `max_search_attempts` files failed to take the record.
    pub fn write(&self, record: &str) -> Result<()> {
        self.ensure_directory()?;

        let data = record.as_bytes();
        let max_attempts = self.policy.max_search_attempts;
        let mut pointed = self.lock_state().clone();
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.write_to_pointed(&pointed.path, data) {
                Ok(()) => return Ok(()),
                Err(err) => last_error = Some(err),
            }
            if attempt == max_attempts {
                break;
            }
            pointed = self.advance_from(pointed.index);
        }

        let last_error = last_error
            .unwrap_or_else(|| file_write_failed(&pointed.path, "no search attempts allowed"));
        tracing::warn!(
            component = module_path!(),
            op = "write",
            event = EVENT_END_ERROR,
            session_id = %self.session_id,
            file_index = pointed.index,
            attempts = max_attempts,
            reason = last_error.message(),
            "incremental search exhausted"
        );
        Err(search_exhausted(max_attempts, &pointed.path, &last_error))
    }

    /// One incremental-search step
    ///
    /// Fails with `FileWriteFailed` when the file cannot be created or sized,
    /// is full, or keeps rejecting appends.
    fn write_to_pointed(&self, path: &Path, data: &[u8]) -> Result<()> {
        if !self.fs.file_exists(path) {
            self.fs.create_file(path).map_err(|e| {
                tracing::debug!(path = %path.display(), error = %e, "log file creation failed");
                file_write_failed(path, format!("cannot create file: {}", e))
            })?;
        }

        // Vanished or unreadable: move on to the next index.
        let size = self.fs.file_size(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "log file size check failed");
            file_write_failed(path, format!("cannot read size: {}", e))
        })?;

        if !self.policy.accepts(size, data.len() as u64) {
            return Err(file_write_failed(
                path,
                format!(
                    "size ceiling of {} bytes reached",
                    self.policy.max_file_size_bytes
                ),
            ));
        }

        let mut last_io_error = None;
        for _ in 0..self.policy.max_write_attempts {
            match self.fs.append(path, data) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    tracing::trace!(path = %path.display(), error = %err, "append failed, retrying");
                    last_io_error = Some(err);
                }
            }
        }
        Err(file_write_failed(
            path,
            last_io_error.map_or_else(|| "no write attempts allowed".to_string(), |e| e.to_string()),
        ))
    }

    /// Advance the pointer past `observed`
    ///
    /// If another thread already moved past `observed` the current pointer
    /// is returned unchanged, so one unusable file costs one rotation.
    fn advance_from(&self, observed: u64) -> RotationState {
        let mut state = self.lock_state();
        if state.index == observed {
            state.index += 1;
            state.path = log_file_path(&self.session_dir, &self.session_id, state.index);
            tracing::debug!(
                component = module_path!(),
                op = "rotate",
                event = EVENT_ROTATED,
                session_id = %self.session_id,
                file_index = state.index,
            );
        }
        state.clone()
    }

    fn lock_state(&self) -> MutexGuard<'_, RotationState> {
        // The state is a plain index/path pair, always consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
