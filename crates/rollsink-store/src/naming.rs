//! Session naming
//!
//! Layout: `<root>/<component>-logs-<session_id>/log_<session_id>_<index>.log`.
//! The index is zero-based and only ever grows within a session.

use crate::errors::{io_error, Result};
use rollsink_core_types::SessionId;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of every log file
pub const LOG_FILE_EXTENSION: &str = "log";

const LOG_FILE_PREFIX: &str = "log_";

/// Name of the directory holding one session's files
pub fn session_dir_name(component_name: &str, session_id: &SessionId) -> String {
    format!("{}-logs-{}", component_name, session_id)
}

/// Absolute session directory under `root`
///
/// A relative `root` is resolved against the current working directory.
pub fn session_directory(
    root: &Path,
    component_name: &str,
    session_id: &SessionId,
) -> Result<PathBuf> {
    let root = if root.is_absolute() {
        root.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| io_error("resolve_logs_root", &e))?
            .join(root)
    };
    Ok(root.join(session_dir_name(component_name, session_id)))
}

/// File name for rotation `index`
pub fn log_file_name(session_id: &SessionId, index: u64) -> String {
    format!(
        "{}{}_{}.{}",
        LOG_FILE_PREFIX, session_id, index, LOG_FILE_EXTENSION
    )
}

pub fn log_file_path(session_dir: &Path, session_id: &SessionId, index: u64) -> PathBuf {
    session_dir.join(log_file_name(session_id, index))
}

/// Rotation index encoded in `file_name`, if it belongs to `session_id`
pub fn parse_log_file_index(file_name: &str, session_id: &SessionId) -> Option<u64> {
    file_name
        .strip_prefix(LOG_FILE_PREFIX)?
        .strip_prefix(session_id.as_str())?
        .strip_prefix('_')?
        .strip_suffix(LOG_FILE_EXTENSION)?
        .strip_suffix('.')?
        .parse()
        .ok()
}

/// The session's log files ordered by rotation index
pub fn list_session_files(session_dir: &Path, session_id: &SessionId) -> Result<Vec<(u64, PathBuf)>> {
    let entries = fs::read_dir(session_dir).map_err(|e| io_error("list_session_files", &e))?;

    let mut files: Vec<(u64, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let index = parse_log_file_index(entry.file_name().to_str()?, session_id)?;
            Some((index, entry.path()))
        })
        .collect();
    files.sort_by_key(|(index, _)| *index);

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn sid(s: &str) -> SessionId {
        SessionId::from_string(s.to_string())
    }

    #[test]
    fn test_log_file_name() {
        assert_eq!(log_file_name(&sid("abc"), 0), "log_abc_0.log");
        assert_eq!(log_file_name(&sid("abc"), 12), "log_abc_12.log");
    }

    #[test]
    fn test_session_directory_absolute_root() {
        let dir = session_directory(Path::new("/var/log"), "ingest", &sid("s1")).unwrap();
        assert_eq!(dir, PathBuf::from("/var/log/ingest-logs-s1"));
    }

    #[test]
    fn test_session_directory_relative_root_is_absolute() {
        let dir = session_directory(Path::new("logs"), "ingest", &sid("s1")).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with("logs/ingest-logs-s1"));
    }

    #[test]
    fn test_parse_rejects_other_sessions() {
        assert_eq!(parse_log_file_index("log_abc_3.log", &sid("abc")), Some(3));
        assert_eq!(parse_log_file_index("log_abd_3.log", &sid("abc")), None);
        assert_eq!(parse_log_file_index("log_abc_x.log", &sid("abc")), None);
        assert_eq!(parse_log_file_index("log_abc_3.txt", &sid("abc")), None);
    }

    #[test]
    fn test_list_session_files_sorted() {
        let dir = TempDir::new().unwrap();
        let id = sid("s");
        for index in [10u64, 2, 0] {
            fs::write(log_file_path(dir.path(), &id, index), b"").unwrap();
        }
        fs::write(dir.path().join("unrelated.txt"), b"").unwrap();

        let indexes: Vec<u64> = list_session_files(dir.path(), &id)
            .unwrap()
            .into_iter()
            .map(|(index, _)| index)
            .collect();
        assert_eq!(indexes, vec![0, 2, 10]);
    }

    proptest! {
        #[test]
        fn prop_name_parse_inverse(index in any::<u64>()) {
            let id = SessionId::new();
            let name = log_file_name(&id, index);
            prop_assert_eq!(parse_log_file_index(&name, &id), Some(index));
        }

        #[test]
        fn prop_names_are_distinct(a in any::<u64>(), b in any::<u64>()) {
            prop_assume!(a != b);
            let id = SessionId::new();
            prop_assert_ne!(log_file_name(&id, a), log_file_name(&id, b));
        }
    }
}
