//! Route store subsystem.
//!
//! # Data Flow
//! ```text
//! management write  → RouteStore::put(key, target)
//! proxy request     → RouteStore::get(key) → Some(target) | None
//!
//! Startup:
//!     StoreConfig → open_store() → MemoryStore | FileStore
//!     → seed routes written for absent keys
//!     → Arc<dyn RouteStore> injected into the HTTP server
//! ```
//!
//! # Design Decisions
//! - The store is a trait object owned by the server state, never a global
//! - A miss is `Ok(None)`; only I/O or encoding failures are errors
//! - Last write wins; no TTL, no versioning

pub mod file;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::schema::{StoreBackend, StoreConfig};
use crate::observability::metrics;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a route store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted routes could not be encoded or decoded.
    #[error("store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The file backend was selected without a path.
    #[error("file store requires a path")]
    MissingPath,
}

/// Key → target mapping consumed by the gateway.
#[async_trait]
pub trait RouteStore: Send + Sync + std::fmt::Debug {
    /// Look up the target registered for `key`.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Register `target` for `key`, replacing any previous value.
    async fn put(&self, key: &str, target: &str) -> Result<(), StoreError>;
}

/// `RouteStore::get` with store metrics and failure logging.
pub async fn lookup(store: &dyn RouteStore, key: &str) -> Result<Option<String>, StoreError> {
    let result = store.get(key).await;
    let outcome = match &result {
        Ok(Some(_)) => "hit",
        Ok(None) => "miss",
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Route lookup failed");
            "error"
        }
    };
    metrics::record_store_operation("get", outcome);
    result
}

/// `RouteStore::put` with store metrics and logging.
pub async fn register(store: &dyn RouteStore, key: &str, target: &str) -> Result<(), StoreError> {
    let result = store.put(key, target).await;
    match &result {
        Ok(()) => {
            tracing::info!(key = %key, target = %target, "Route registered");
            metrics::record_store_operation("put", "ok");
        }
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Route write failed");
            metrics::record_store_operation("put", "error");
        }
    }
    result
}

/// Open the configured store and apply seed routes.
///
/// Seeds only fill keys that are currently absent, so routes written through
/// the management interface survive a restart of a file-backed store.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn RouteStore>, StoreError> {
    let store: Arc<dyn RouteStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::File => {
            let path = config.path.as_deref().ok_or(StoreError::MissingPath)?;
            Arc::new(FileStore::open(path).await?)
        }
    };

    let mut seeded = 0;
    for (key, target) in &config.routes {
        if store.get(key).await?.is_none() {
            store.put(key, target).await?;
            seeded += 1;
        }
    }

    tracing::info!(
        backend = ?config.backend,
        seeded,
        "Route store opened"
    );

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_store_with_seeds() {
        let mut config = StoreConfig::default();
        config.routes.insert("docs".into(), "https://example.com/docs/".into());

        let store = open_store(&config).await.unwrap();
        assert_eq!(
            store.get("docs").await.unwrap().as_deref(),
            Some("https://example.com/docs/")
        );
        assert!(store.get("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_backend_requires_path() {
        let config = StoreConfig {
            backend: StoreBackend::File,
            path: None,
            ..Default::default()
        };

        let err = open_store(&config).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingPath));
    }

    #[tokio::test]
    async fn test_seed_does_not_overwrite_existing_route() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.json");

        let existing = FileStore::open(&path).await.unwrap();
        existing.put("docs", "https://written.example/").await.unwrap();
        drop(existing);

        let mut config = StoreConfig {
            backend: StoreBackend::File,
            path: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        config.routes.insert("docs".into(), "https://seed.example/".into());

        let store = open_store(&config).await.unwrap();
        assert_eq!(
            store.get("docs").await.unwrap().as_deref(),
            Some("https://written.example/")
        );
    }
}
