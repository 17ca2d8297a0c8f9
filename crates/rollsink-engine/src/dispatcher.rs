//! Async write path
//!
//! Callers push rendered lines into a bounded queue and return at once. A
//! worker thread drains the queue every flush period; `flush()` drains on the
//! calling thread. Both drains run under one drain lock, so lines reach the
//! writer in queue order no matter who drains.
//!
//! A full queue drops its oldest line. Dropped counts are reported through
//! diagnostics on the next drain.

use crate::mirror::FailureMirror;
use rollsink_core::{ExError, ExErrorKind};
use rollsink_core_types::schema::EVENT_DROPPED;
use rollsink_store::FileWriter;
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const WORKER_THREAD_NAME: &str = "rollsink-writer";

/// A rendered line and the title it is reported under if the write fails
#[derive(Debug)]
struct QueuedLine {
    title: String,
    line: String,
}

#[derive(Debug, Default)]
struct QueueState {
    lines: VecDeque<QueuedLine>,
    dropped: u64,
    shutdown: bool,
}

#[derive(Debug)]
struct Shared {
    queue: Mutex<QueueState>,
    wake: Condvar,
    drain_lock: Mutex<()>,
    capacity: usize,
    writer: Arc<FileWriter>,
    failures: FailureMirror,
}

impl Shared {
    fn lock_queue(&self) -> MutexGuard<'_, QueueState> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write everything queued so far, in order
    fn drain(&self) {
        let _drain = self.drain_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (batch, dropped) = {
            let mut queue = self.lock_queue();
            (
                std::mem::take(&mut queue.lines),
                std::mem::take(&mut queue.dropped),
            )
        };

        if dropped > 0 {
            tracing::warn!(
                component = module_path!(),
                op = "enqueue",
                event = EVENT_DROPPED,
                session_id = %self.writer.session_id(),
                dropped = dropped,
                "async queue full, oldest records dropped"
            );
        }

        for queued in batch {
            if let Err(err) = self.writer.write(&queued.line) {
                self.failures.report(&queued.title, &err);
            }
        }
    }
}

/// Bounded queue plus its background writer thread
#[derive(Debug)]
pub struct AsyncDispatcher {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl AsyncDispatcher {
    /// Spawn the worker thread
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error when the OS refuses to spawn the thread.
    pub fn start(
        writer: Arc<FileWriter>,
        capacity: usize,
        period: Duration,
        failures: FailureMirror,
    ) -> Result<Self, ExError> {
        let shared = Arc::new(Shared {
            queue: Mutex::new(QueueState::default()),
            wake: Condvar::new(),
            drain_lock: Mutex::new(()),
            capacity: capacity.max(1),
            writer,
            failures,
        });

        let worker_shared = shared.clone();
        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || run_worker(&worker_shared, period))
            .map_err(|e| {
                ExError::new(ExErrorKind::Internal)
                    .with_op("start_async_worker")
                    .with_message(e.to_string())
            })?;

        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Queue one line, dropping the oldest if the queue is full
    pub fn enqueue(&self, title: &str, line: String) {
        let mut queue = self.shared.lock_queue();
        if queue.lines.len() >= self.shared.capacity {
            queue.lines.pop_front();
            queue.dropped += 1;
        }
        queue.lines.push_back(QueuedLine {
            title: title.to_string(),
            line,
        });
    }

    /// Drain the queue on the calling thread
    pub fn flush(&self) {
        self.shared.drain();
    }

    /// Lines waiting for the next drain
    pub fn pending(&self) -> usize {
        self.shared.lock_queue().lines.len()
    }
}

impl Drop for AsyncDispatcher {
    fn drop(&mut self) {
        self.shared.lock_queue().shutdown = true;
        self.shared.wake.notify_all();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                // Worker panicked mid-drain; write what is left here.
                self.shared.drain();
            }
        }
    }
}

fn run_worker(shared: &Shared, period: Duration) {
    loop {
        let shutdown = {
            let queue = shared.lock_queue();
            let (queue, _) = shared
                .wake
                .wait_timeout_while(queue, period, |state| !state.shutdown)
                .unwrap_or_else(PoisonError::into_inner);
            queue.shutdown
        };

        shared.drain();

        if shutdown {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollsink_core::RotationPolicy;
    use rollsink_core_types::SessionId;
    use std::fs;
    use tempfile::TempDir;

    fn writer_in(temp: &TempDir) -> Arc<FileWriter> {
        Arc::new(FileWriter::new(
            SessionId::from_string("async".to_string()),
            temp.path().join("app-logs-async"),
            RotationPolicy::default(),
        ))
    }

    fn contents(writer: &FileWriter) -> String {
        fs::read_to_string(writer.current_file_path()).unwrap_or_default()
    }

    #[test]
    fn test_flush_writes_in_enqueue_order() {
        let temp = TempDir::new().unwrap();
        let writer = writer_in(&temp);
        let dispatcher = AsyncDispatcher::start(
            writer.clone(),
            16,
            Duration::from_secs(3600),
            FailureMirror::new(false),
        )
        .unwrap();

        for i in 0..5 {
            dispatcher.enqueue("Seq", format!("line {}\n", i));
        }
        dispatcher.flush();

        assert_eq!(dispatcher.pending(), 0);
        assert_eq!(contents(&writer), "line 0\nline 1\nline 2\nline 3\nline 4\n");
    }

    #[test]
    fn test_full_queue_drops_oldest() {
        let temp = TempDir::new().unwrap();
        let writer = writer_in(&temp);
        let dispatcher = AsyncDispatcher::start(
            writer.clone(),
            2,
            Duration::from_secs(3600),
            FailureMirror::new(false),
        )
        .unwrap();

        for i in 0..5 {
            dispatcher.enqueue("Seq", format!("line {}\n", i));
        }
        assert_eq!(dispatcher.pending(), 2);
        dispatcher.flush();

        assert_eq!(contents(&writer), "line 3\nline 4\n");
    }

    #[test]
    fn test_drop_drains_pending_lines() {
        let temp = TempDir::new().unwrap();
        let writer = writer_in(&temp);
        let dispatcher = AsyncDispatcher::start(
            writer.clone(),
            16,
            Duration::from_secs(3600),
            FailureMirror::new(false),
        )
        .unwrap();

        dispatcher.enqueue("Bye", "last words\n".to_string());
        drop(dispatcher);

        assert_eq!(contents(&writer), "last words\n");
    }

    #[test]
    fn test_worker_drains_on_its_own() {
        let temp = TempDir::new().unwrap();
        let writer = writer_in(&temp);
        let dispatcher = AsyncDispatcher::start(
            writer.clone(),
            16,
            Duration::from_millis(10),
            FailureMirror::new(false),
        )
        .unwrap();

        dispatcher.enqueue("Tick", "tick\n".to_string());

        let mut waited = 0;
        while contents(&writer).is_empty() && waited < 200 {
            thread::sleep(Duration::from_millis(10));
            waited += 1;
        }
        assert_eq!(contents(&writer), "tick\n");
    }
}
