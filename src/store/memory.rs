//! In-process route store.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{RouteStore, StoreError};

/// A thread-safe, non-persistent route store.
///
/// Routes live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    routes: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `routes`.
    pub fn with_routes<I, K, V>(routes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (key, target) in routes {
            store.routes.insert(key.into(), target.into());
        }
        store
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[async_trait]
impl RouteStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.routes.get(key).map(|r| r.value().clone()))
    }

    async fn put(&self, key: &str, target: &str) -> Result<(), StoreError> {
        self.routes.insert(key.to_string(), target.to_string());
        Ok(())
    }
}
