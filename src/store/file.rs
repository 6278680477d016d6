//! JSON-file-backed route store.
//!
//! The file holds a single JSON object of `key → target`. It is read once on
//! open and rewritten in full on every `put` (temp file + rename).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use super::{RouteStore, StoreError};

/// Route store that persists every write to a JSON file.
#[derive(Debug)]
pub struct FileStore {
    routes: DashMap<String, String>,
    path: PathBuf,
    /// Serializes file rewrites so snapshots never interleave.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let routes = DashMap::new();

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let map: BTreeMap<String, String> = serde_json::from_str(&content)?;
                for (k, v) in map {
                    routes.insert(k, v);
                }
                tracing::info!(path = %path.display(), routes = routes.len(), "Loaded routes from file");
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Route file not found, starting empty");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self {
            routes,
            path,
            write_lock: Mutex::new(()),
        })
    }

    async fn persist(&self, snapshot: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, encoded).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RouteStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.routes.get(key).map(|r| r.value().clone()))
    }

    async fn put(&self, key: &str, target: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut snapshot: BTreeMap<String, String> = self
            .routes
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        snapshot.insert(key.to_string(), target.to_string());

        // Only publish the entry once it is on disk.
        self.persist(&snapshot).await?;
        self.routes.insert(key.to_string(), target.to_string());

        tracing::debug!(key = %key, routes = snapshot.len(), "Persisted route");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("routes.json")).await.unwrap();
        assert!(store.get("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_persistence_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");

        let store = FileStore::open(&path).await.unwrap();
        store.put("api", "https://api.example.com/v1/").await.unwrap();
        store.put("api", "https://api.example.com/v2/").await.unwrap();
        store.put("docs", "https://docs.example.com").await.unwrap();
        drop(store);

        let reopened = FileStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get("api").await.unwrap().as_deref(),
            Some("https://api.example.com/v2/")
        );
        assert_eq!(
            reopened.get("docs").await.unwrap().as_deref(),
            Some("https://docs.example.com")
        );
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Encoding(_)));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_unmodified() {
        let dir = tempfile::tempdir().unwrap();
        // Parent directory does not exist, so the temp file cannot be created.
        let path = dir.path().join("missing").join("routes.json");

        let store = FileStore::open(&path).await.unwrap();
        assert!(store.put("k", "https://example.com").await.is_err());
        assert!(store.get("k").await.unwrap().is_none());
    }
}
