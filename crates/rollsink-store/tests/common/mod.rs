use rollsink_core::RotationPolicy;
use rollsink_core_types::SessionId;
use rollsink_store::{FileWriter, LogFileSystem, StdFileSystem};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// Real filesystem with switchable faults and call counters
#[derive(Debug, Default)]
pub struct FaultyFileSystem {
    pub fail_appends: AtomicBool,
    pub fail_dir_creation: AtomicBool,
    pub fail_size_checks: AtomicBool,
    pub append_calls: AtomicUsize,
    pub dir_creations: AtomicUsize,
}

#[allow(dead_code)]
impl FaultyFileSystem {
    pub fn appends(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }

    pub fn dir_creations(&self) -> usize {
        self.dir_creations.load(Ordering::SeqCst)
    }
}

impl LogFileSystem for FaultyFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        StdFileSystem.dir_exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.dir_creations.fetch_add(1, Ordering::SeqCst);
        if self.fail_dir_creation.load(Ordering::SeqCst) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated permission denied",
            ));
        }
        StdFileSystem.create_dir_all(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        StdFileSystem.file_exists(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        StdFileSystem.create_file(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        if self.fail_size_checks.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "simulated vanish"));
        }
        StdFileSystem.file_size(path)
    }

    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "simulated write failure"));
        }
        StdFileSystem.append(path, data)
    }
}

/// Writer over `fs` in a fresh session directory below `root`
#[allow(dead_code)]
pub fn faulty_writer(
    root: &Path,
    policy: RotationPolicy,
    fs: Arc<FaultyFileSystem>,
) -> FileWriter {
    let session_id = SessionId::new();
    let dir = root.join(format!("test-logs-{}", session_id));
    FileWriter::with_file_system(session_id, dir, policy, fs)
}

/// Writer over the real filesystem
#[allow(dead_code)]
pub fn std_writer(root: &Path, policy: RotationPolicy) -> FileWriter {
    let session_id = SessionId::new();
    let dir: PathBuf = root.join(format!("test-logs-{}", session_id));
    FileWriter::new(session_id, dir, policy)
}
