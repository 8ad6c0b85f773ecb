use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::utils::constants::BLOB_PREFIX;

/// Blob path for one transformed record, partitioned by year and station code
pub fn record_key(year: &str, stn_code: &str, event_id: &str) -> String {
    format!(
        "{}/year={}/stn_code={}/record_{}.json",
        BLOB_PREFIX, year, stn_code, event_id
    )
}

/// Path-keyed object store, the transformer's sink
pub trait BlobStore {
    fn put_object(&self, key: &str, body: &[u8]) -> Result<()>;
    fn get_object(&self, key: &str) -> Result<Vec<u8>>;
    fn list_objects(&self, prefix: &str) -> Result<Vec<String>>;
}

/// Directory-rooted object store: keys map to file paths under the root
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn collect_keys(&self, dir: &Path, keys: &mut Vec<String>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                self.collect_keys(&path, keys)?;
            } else if let Ok(relative) = path.strip_prefix(&self.root) {
                keys.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }

        Ok(())
    }
}

impl BlobStore for FsBlobStore {
    fn put_object(&self, key: &str, body: &[u8]) -> Result<()> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, body)?;
        debug!(key, bytes = body.len(), "object written");
        Ok(())
    }

    fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(key);
        fs::read(&path)
            .map_err(|e| PipelineError::Storage(format!("failed to read object '{}': {}", key, e)))
    }

    fn list_objects(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        if self.root.exists() {
            self.collect_keys(&self.root, &mut keys)?;
        }

        keys.retain(|k| k.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }
}

/// In-memory object store used in tests
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    fn put_object(&self, key: &str, body: &[u8]) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), body.to_vec());
        Ok(())
    }

    fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| PipelineError::Storage(format!("no such object: '{}'", key)))
    }

    fn list_objects(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_record_key_layout() {
        let key = record_key("2019", "1393", "d9f1");
        assert_eq!(key, "water_data/year=2019/stn_code=1393/record_d9f1.json");
    }

    #[test]
    fn test_fs_store_put_get_list() {
        let dir = TempDir::new().unwrap();
        let store = FsBlobStore::open(dir.path().join("bucket")).unwrap();

        let key = record_key("2019", "1393", "abc");
        store.put_object(&key, b"{\"pH\":7.8}").unwrap();
        assert_eq!(store.get_object(&key).unwrap(), b"{\"pH\":7.8}".to_vec());

        let listed = store.list_objects("water_data/year=2019/").unwrap();
        assert_eq!(listed, vec![key]);
        assert!(store.list_objects("water_data/year=2020/").unwrap().is_empty());
    }

    #[test]
    fn test_fs_store_get_missing_object() {
        let dir = TempDir::new().unwrap();
        let store = FsBlobStore::open(dir.path()).unwrap();
        assert!(store.get_object("water_data/nope.json").is_err());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryBlobStore::new();
        store.put_object("a/b.json", b"body").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_object("a/b.json").unwrap(), b"body".to_vec());
        assert_eq!(store.list_objects("a/").unwrap(), vec!["a/b.json".to_string()]);
    }
}
