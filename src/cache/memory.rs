//! In-process cache store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use crate::cache::store::CacheStore;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// Thread-safe in-memory store with lazy expiry.
///
/// Expired entries are evicted on the read path; there is no sweeper
/// task. Suitable as the default store and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        // The read guard must be released before removing the entry.
        {
            let entry = self.entries.get(key)?;
            if Instant::now() < entry.expires_at {
                return Some(entry.value.clone());
            }
        }
        self.entries.remove(key);
        None
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) {
        self.entries.insert(
            key.to_owned(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let store = MemoryStore::new();
        assert!(store.get("k").await.is_none());

        store.set("k", "v1".into(), Duration::from_secs(30)).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v1"));

        store.set("k", "v2".into(), Duration::from_secs(30)).await;
        assert_eq!(store.get("k").await.as_deref(), Some("v2"));
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let store = MemoryStore::new();
        store.set("k", "v".into(), Duration::from_secs(30)).await;

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(store.get("k").await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(store.get("k").await.is_none());
        assert!(store.is_empty());
    }
}
