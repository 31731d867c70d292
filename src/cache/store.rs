//! Cache store seam.

use async_trait::async_trait;
use std::time::Duration;

/// Key/value store with per-entry expiry.
///
/// The persistence engine behind this trait is not the gateway's
/// concern; it only relies on get/set-with-TTL semantics. Implementations
/// must be `Send + Sync` for use across request tasks.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// The stored value for `key`, if present and unexpired.
    async fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, expiring after `ttl`. Overwrites any
    /// existing entry wholesale.
    async fn set(&self, key: &str, value: String, ttl: Duration);
}
