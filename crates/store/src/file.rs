//! File-backed store: one JSON document per key inside a data directory.

use insights_core::InsightsResult;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::KeyValueStore;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> InsightsResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> InsightsResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> InsightsResult<()> {
        let path = self.path_for(key);
        fs::write(&path, value)?;
        debug!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> InsightsResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> JsonFileStore {
        let dir = std::env::temp_dir().join(format!("insights-store-{}", Uuid::new_v4()));
        JsonFileStore::open(dir).unwrap()
    }

    #[test]
    fn test_set_get_remove() {
        let store = temp_store();
        assert_eq!(store.get("dataset").unwrap(), None);

        store.set("dataset", "[]").unwrap();
        assert_eq!(store.get("dataset").unwrap(), Some("[]".to_string()));

        store.remove("dataset").unwrap();
        assert_eq!(store.get("dataset").unwrap(), None);

        // Removing an absent key is not an error.
        store.remove("dataset").unwrap();
    }

    #[test]
    fn test_values_survive_reopen() {
        let store = temp_store();
        store.set("prefs", "{\"group_by\":\"campaign\"}").unwrap();

        let reopened = JsonFileStore::open(&store.dir).unwrap();
        assert_eq!(
            reopened.get("prefs").unwrap(),
            Some("{\"group_by\":\"campaign\"}".to_string())
        );
    }
}
