use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Several `FileStore`s may point at the same file: every write re-reads it first.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        // An unreadable file is replaced rather than blocking every future save.
        let mut values = self.read_all().unwrap_or_else(|e| {
            log::warn!("discarding unreadable store {}: {}", self.path.display(), e);
            BTreeMap::new()
        });
        values.insert(key.to_string(), value);
        self.write_all(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut values = self.read_all()?;
        if values.remove(key).is_some() {
            self.write_all(&values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_basics() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v".into()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn file_store_shares_one_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("save.json");
        let mut a = FileStore::new(&path);
        let mut b = FileStore::new(&path);

        a.set("player_progress", "{}".into()).unwrap();
        b.set("settings", "[]".into()).unwrap();

        let reader = FileStore::new(&path);
        assert_eq!(reader.path(), path.as_path());
        assert!(path.exists());
        assert_eq!(reader.get("player_progress").unwrap().as_deref(), Some("{}"));
        assert_eq!(reader.get("settings").unwrap().as_deref(), Some("[]"));

        a.remove("settings").unwrap();
        assert_eq!(reader.get("settings").unwrap(), None);
    }

    #[test]
    fn file_store_reports_corruption_on_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = FileStore::new(&path);
        assert!(matches!(store.get("k"), Err(StorageError::Json(_))));

        store.set("k", "v".into()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
