//! Reading and writing the JSON record document. The file is the single
//! source of truth between runs: a UTF-8 JSON array of record objects,
//! pretty-printed with two-space indentation and non-ASCII text emitted
//! literally so the document stays hand-editable.

use std::fs;
use std::path::Path;

use crate::error::StoreError;
use crate::models::Record;

/// Read the document if present. A missing file is an empty store; a file
/// that exists but fails to parse is surfaced as a parse error with no
/// recovery attempted.
pub fn load_records(path: &Path) -> Result<Vec<Record>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        operation: "read",
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the full record list back, overwriting unconditionally.
pub fn save_records(path: &Path, records: &[Record]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }

    let mut body = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    body.push(b'\n');

    fs::write(path, body).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        operation: "write",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{load_records, save_records};
    use crate::error::StoreError;
    use crate::models::Record;

    fn record(name: &str, region: &str) -> Record {
        Record {
            name: name.to_string(),
            region: region.to_string(),
            ..Record::default()
        }
    }

    #[test]
    fn missing_file_reads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let records = load_records(&dir.path().join("stores.json")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn saved_records_round_trip_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stores.json");
        let records = vec![record("Alpha", "Seoul"), record("Beta", "Busan")];

        save_records(&path, &records).unwrap();
        assert_eq!(load_records(&path).unwrap(), records);
    }

    #[test]
    fn document_is_pretty_printed_with_literal_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stores.json");

        save_records(&path, &[record("알파", "서울")]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();

        assert!(raw.starts_with("[\n  {"));
        assert!(raw.contains("  \"name\": \"알파\""));
        assert!(raw.contains("서울"));
        assert!(!raw.contains("\\u"));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stores.json");
        std::fs::write(&path, "{ not json").unwrap();

        match load_records(&path) {
            Err(StoreError::Parse { .. }) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
