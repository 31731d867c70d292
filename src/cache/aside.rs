//! Cache-aside read path.
//!
//! # Design Decisions
//! - A hit bypasses the builder entirely; the upstreams are not
//!   consulted at all
//! - An entry that no longer deserializes is logged and treated as a
//!   miss, then overwritten by the rebuilt value
//! - No single-flight: two concurrent misses for one key both rebuild
//!   and both write, the later write winning; rebuilding is idempotent,
//!   so this is an accepted inefficiency rather than a correctness
//!   hazard
//! - A failed build writes nothing; only successes reach the store

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::store::CacheStore;
use crate::observability::metrics;

/// Read-through wrapper over a [`CacheStore`].
#[derive(Clone)]
pub struct CacheAside {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
}

impl CacheAside {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Serve `key` from the cache, or build, store with the configured
    /// TTL, and return the fresh value.
    pub async fn get_or_build<T, E, F, Fut>(&self, key: &str, build: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(raw) = self.store.get(key).await {
            match serde_json::from_str(&raw) {
                Ok(value) => {
                    metrics::record_cache_lookup(true);
                    tracing::debug!(key, "cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    tracing::warn!(key, error = %err, "undecodable cache entry, rebuilding");
                }
            }
        }
        metrics::record_cache_lookup(false);

        let value = build().await?;
        match serde_json::to_string(&value) {
            Ok(raw) => self.store.set(key, raw, self.ttl).await,
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to serialize value for cache");
            }
        }
        Ok(value)
    }
}
