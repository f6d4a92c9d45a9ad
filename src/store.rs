//! Best-effort persistence for attempt records.
//!
//! A single JSON file maps normalized email -> record. Read and write
//! failures are swallowed: the limiter degrades to an empty map rather than
//! ever blocking authentication on storage problems. Malformed contents are
//! treated as empty, matching the tolerance of the on-disk format's readers.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::constants::*;
use crate::limiter::AttemptRecord;

pub struct AttemptStore {
    /// None when no usable data directory exists; all operations degrade to
    /// no-ops on an empty map
    path: Option<PathBuf>,
}

impl AttemptStore {
    /// Store under the platform-local data directory
    pub fn open_default() -> Self {
        match dirs::data_local_dir() {
            Some(dir) => Self::at(dir.join(APP_DIR_NAME).join(ATTEMPTS_FILE_NAME)),
            None => {
                tracing::warn!("no data directory available, attempt records will not persist");
                Self::unavailable()
            }
        }
    }

    /// Store at an explicit file path
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// A store that never persists anything
    pub fn unavailable() -> Self {
        Self { path: None }
    }

    pub fn load(&self) -> HashMap<String, AttemptRecord> {
        let Some(path) = &self.path else {
            return HashMap::new();
        };

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            // Missing file is the normal first-run case
            Err(_) => return HashMap::new(),
        };

        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!("malformed attempt store at {:?}: {}", path, err);
                HashMap::new()
            }
        }
    }

    pub fn save(&self, records: &HashMap<String, AttemptRecord>) {
        let Some(path) = &self.path else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!("cannot create {:?}: {}", parent, err);
                return;
            }
        }

        let json = match serde_json::to_string(records) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("cannot serialize attempt records: {}", err);
                return;
            }
        };

        if let Err(err) = std::fs::write(path, json) {
            tracing::warn!("cannot write attempt store at {:?}: {}", path, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "dragon-gate-store-{}-{}.json",
            tag,
            std::process::id()
        ))
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("roundtrip");
        let _ = std::fs::remove_file(&path);
        let store = AttemptStore::at(path.clone());

        let mut records = HashMap::new();
        records.insert(
            "user@example.com".to_string(),
            AttemptRecord {
                count: 3,
                first_attempt: 1234,
                locked_until: None,
            },
        );
        store.save(&records);

        assert_eq!(store.load(), records);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_disk_format_uses_camel_case_fields() {
        let path = temp_path("format");
        let _ = std::fs::remove_file(&path);
        let store = AttemptStore::at(path.clone());

        let mut records = HashMap::new();
        records.insert(
            "user@example.com".to_string(),
            AttemptRecord {
                count: 5,
                first_attempt: 10,
                locked_until: Some(900_010),
            },
        );
        store.save(&records);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"firstAttempt\":10"));
        assert!(raw.contains("\"lockedUntil\":900010"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = AttemptStore::at(temp_path("missing-never-created"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_file_loads_empty() {
        let path = temp_path("malformed");
        std::fs::write(&path, "{not json at all").unwrap();
        let store = AttemptStore::at(path.clone());

        assert!(store.load().is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unavailable_store_is_a_no_op() {
        let store = AttemptStore::unavailable();
        store.save(&HashMap::new());
        assert!(store.load().is_empty());
    }
}
