use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dailyflame_core::store::KeyValueStore;

use crate::error::StoreError;

/// Key-value store persisted as one JSON object on disk.
///
/// Every mutation rewrites the whole file. Write failures are logged and the
/// in-memory copy stays authoritative for the rest of the run.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    /// Open `path`, starting empty if it cannot be read.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(path = %path.display(), "{e}, starting with empty data");
                Self {
                    path,
                    entries: BTreeMap::new(),
                }
            },
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to encode data file: {e}");
                return;
            },
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), "Failed to write data file: {e}");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dailyflame-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        let store = FileStore::open(&path).unwrap();
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn values_survive_reopen() {
        let path = temp_path("reopen");
        let mut store = FileStore::open(&path).unwrap();
        store.set("dailyGamesProgress", "{\"day\":\"2026-10-18\"}".to_string());
        store.set("other", "1".to_string());
        store.remove("other");

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("dailyGamesProgress").as_deref(),
            Some("{\"day\":\"2026-10-18\"}")
        );
        assert!(reopened.get("other").is_none());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_is_an_error_or_empty() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStore::open(&path), Err(StoreError::Parse(_))));
        let store = FileStore::open_or_empty(&path);
        assert!(store.get("dailyGamesSelection").is_none());
        let _ = std::fs::remove_file(&path);
    }
}
