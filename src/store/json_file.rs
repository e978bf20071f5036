//! File-backed best-time store.
//!
//! A single JSON object mapping board dimension to seconds, for example
//! `{"4": 45, "6": 120}`, kept under the user's config directory. Reads
//! and writes go through the whole file; the records are two integers, so
//! there is nothing to be clever about. I/O failures are logged at `warn`
//! and otherwise swallowed.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use rustc_hash::FxHashMap;

use super::BestTimeStore;
use crate::core::BoardSize;

const RECORDS_FILE_NAME: &str = "best_times.json";

/// Best-time store persisted as a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by an explicit file path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The conventional records path under the user config directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "memory-match")
            .map(|dirs| dirs.config_dir().join(RECORDS_FILE_NAME))
    }

    /// Create a store at the conventional location, or `None` when no home
    /// directory can be determined.
    #[must_use]
    pub fn at_default_location() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    /// The file this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> FxHashMap<u8, u32> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) => {
                // A missing file just means no records yet.
                if err.kind() != std::io::ErrorKind::NotFound {
                    log::warn!(
                        "could not read best-time records at {}: {}",
                        self.path.display(),
                        err
                    );
                }
                return FxHashMap::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!(
                    "best-time records at {} are unreadable, starting fresh: {}",
                    self.path.display(),
                    err
                );
                FxHashMap::default()
            }
        }
    }

    fn write_all(&self, entries: &FxHashMap<u8, u32>) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!("could not create {}: {}", parent.display(), err);
                return;
            }
        }

        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(serialized) => serialized,
            Err(err) => {
                log::warn!("could not serialize best-time records: {}", err);
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, serialized) {
            log::warn!(
                "could not write best-time records to {}: {}",
                self.path.display(),
                err
            );
        }
    }
}

impl BestTimeStore for JsonFileStore {
    fn load(&self, size: BoardSize) -> Option<u32> {
        self.read_all().get(&size.raw()).copied().filter(|&s| s > 0)
    }

    fn save(&mut self, size: BoardSize, seconds: u32) {
        let mut entries = self.read_all();
        entries.insert(size.raw(), seconds);
        self.write_all(&entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("records").join(RECORDS_FILE_NAME))
    }

    #[test]
    fn test_missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load(BoardSize::EASY), None);
    }

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.save(BoardSize::EASY, 45);
        store.save(BoardSize::HARD, 120);

        assert_eq!(store.load(BoardSize::EASY), Some(45));
        assert_eq!(store.load(BoardSize::HARD), Some(120));
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RECORDS_FILE_NAME);

        let mut store = JsonFileStore::new(path.clone());
        store.save(BoardSize::EASY, 45);
        drop(store);

        let reopened = JsonFileStore::new(path);
        assert_eq!(reopened.load(BoardSize::EASY), Some(45));
    }

    #[test]
    fn test_corrupt_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(RECORDS_FILE_NAME);
        fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::new(path);
        assert_eq!(store.load(BoardSize::EASY), None);
    }

    #[test]
    fn test_save_keeps_other_sizes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        store.save(BoardSize::EASY, 45);
        store.save(BoardSize::HARD, 120);
        store.save(BoardSize::EASY, 30);

        assert_eq!(store.load(BoardSize::EASY), Some(30));
        assert_eq!(store.load(BoardSize::HARD), Some(120));
    }

    #[test]
    fn test_file_is_plain_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.save(BoardSize::EASY, 45);

        let raw = fs::read_to_string(store.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["4"], 45);
    }
}
