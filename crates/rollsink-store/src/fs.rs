//! Filesystem seam for the writer
//!
//! The writer only touches the disk through `LogFileSystem`, so tests can
//! inject failures (denied directories, failing appends, vanished files)
//! without relying on real permission setups.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Filesystem operations needed by the rotating writer
pub trait LogFileSystem: Send + Sync + std::fmt::Debug {
    fn dir_exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn file_exists(&self, path: &Path) -> bool;

    /// Create an empty file if none exists
    fn create_file(&self, path: &Path) -> io::Result<()>;

    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Append `data` with a single write
    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}

/// `LogFileSystem` backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl LogFileSystem for StdFileSystem {
    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(|_| ())
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        fs::metadata(path).map(|metadata| metadata.len())
    }

    fn append(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        // O_APPEND: each write lands at the current end of file, so lines
        // from concurrent writers do not overwrite each other.
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_file_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.log");

        StdFileSystem.create_file(&path).unwrap();
        StdFileSystem.append(&path, b"abc").unwrap();
        StdFileSystem.create_file(&path).unwrap();

        assert_eq!(StdFileSystem.file_size(&path).unwrap(), 3);
    }

    #[test]
    fn test_append_accumulates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.log");

        StdFileSystem.append(&path, b"one\n").unwrap();
        StdFileSystem.append(&path, b"two\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_file_size_of_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(StdFileSystem.file_size(&dir.path().join("none")).is_err());
        assert!(!StdFileSystem.file_exists(&dir.path().join("none")));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        assert!(StdFileSystem.dir_exists(dir.path()));
        assert!(!StdFileSystem.file_exists(dir.path()));
        assert!(StdFileSystem.create_file(dir.path()).is_err());
    }
}
