//! Shared fixtures for engine tests

#![allow(dead_code)]

use rollsink_engine::LoggerConfiguration;
use rollsink_store::{LogFileSystem, StdFileSystem};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// Production configuration rooted in `temp`
pub fn config_in(temp: &TempDir) -> LoggerConfiguration {
    LoggerConfiguration::production()
        .with_component_name("it")
        .with_logs_directory(temp.path())
}

/// Directories directly under `root`
pub fn subdirectories(root: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(root)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_dir())
                .collect()
        })
        .unwrap_or_default()
}

/// Filesystem whose appends always fail, as on a full disk
#[derive(Debug, Default)]
pub struct FullDisk {
    appends: AtomicU32,
}

impl FullDisk {
    pub fn appends(&self) -> u32 {
        self.appends.load(Ordering::SeqCst)
    }
}

impl LogFileSystem for FullDisk {
    fn dir_exists(&self, path: &Path) -> bool {
        StdFileSystem.dir_exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        StdFileSystem.create_dir_all(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        StdFileSystem.file_exists(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        StdFileSystem.create_file(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        StdFileSystem.file_size(path)
    }

    fn append(&self, _path: &Path, _data: &[u8]) -> io::Result<()> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::other("no space left on device"))
    }
}

/// Filesystem whose appends take `delay` before landing
#[derive(Debug)]
pub struct SlowDisk {
    delay: Duration,
}

impl SlowDisk {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl LogFileSystem for SlowDisk {
    fn dir_exists(&self, path: &Path) -> bool {
        StdFileSystem.dir_exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        StdFileSystem.create_dir_all(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        StdFileSystem.file_exists(path)
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        StdFileSystem.create_file(path)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        StdFileSystem.file_size(path)
    }

    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        std::thread::sleep(self.delay);
        StdFileSystem.append(path, data)
    }
}
