//! The commit counter: a plain-text file holding one base-10 integer. The
//! value doubles as the commit message for the publish step, so it only
//! advances after a push actually lands.

use std::fs;
use std::path::Path;

use crate::error::PublishError;

/// Read the counter, creating the file with `1` when it is absent.
pub fn load_commit_count(path: &Path) -> Result<u64, PublishError> {
    if !path.exists() {
        save_commit_count(path, 1)?;
        return Ok(1);
    }

    let raw = fs::read_to_string(path).map_err(PublishError::Counter)?;
    raw.trim().parse::<u64>().map_err(PublishError::CounterFormat)
}

/// Persist a new counter value.
pub fn save_commit_count(path: &Path, count: u64) -> Result<(), PublishError> {
    fs::write(path, count.to_string()).map_err(PublishError::Counter)
}

#[cfg(test)]
mod tests {
    use super::{load_commit_count, save_commit_count};
    use crate::error::PublishError;

    #[test]
    fn absent_file_is_created_at_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commit_count.txt");

        assert_eq!(load_commit_count(&path).unwrap(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "1");
    }

    #[test]
    fn saved_value_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commit_count.txt");

        save_commit_count(&path, 41).unwrap();
        assert_eq!(load_commit_count(&path).unwrap(), 41);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commit_count.txt");
        std::fs::write(&path, "7\n").unwrap();

        assert_eq!(load_commit_count(&path).unwrap(), 7);
    }

    #[test]
    fn garbage_contents_are_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commit_count.txt");
        std::fs::write(&path, "not a number").unwrap();

        match load_commit_count(&path) {
            Err(PublishError::CounterFormat(_)) => {}
            other => panic!("expected format error, got {other:?}"),
        }
    }
}
