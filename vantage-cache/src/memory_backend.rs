//! Process-local cache backend.
//!
//! Used when the Redis backend is unreachable at construction time. Entries
//! have no TTL: they live until explicitly deleted or the process exits.
//! This asymmetry with the remote backend is deliberate - the fallback is a
//! bounded-lifetime degradation, not a second cache tier.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use tracing::warn;

use crate::traits::{decode_value, encode_value, CacheStats, CacheStore, StatsCounters};

/// In-memory cache store guarded by a `RwLock`.
///
/// Safe for concurrent use; lock poisoning degrades to a miss/no-op like
/// any other backend error.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, String>>,
    stats: StatsCounters,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries, for tests and diagnostics.
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Option<Value> {
        let raw = match self.entries.read() {
            Ok(map) => map.get(key).cloned(),
            Err(_) => {
                warn!(key, "memory cache lock poisoned on get");
                None
            }
        };

        match raw {
            Some(raw) => {
                self.stats.record_hit();
                Some(decode_value(raw))
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &Value, _ttl: Option<Duration>) {
        // TTL ignored: the fallback store has no expiry.
        match self.entries.write() {
            Ok(mut map) => {
                map.insert(key.to_string(), encode_value(value));
            }
            Err(_) => warn!(key, "memory cache lock poisoned on set"),
        }
    }

    async fn delete(&self, key: &str) {
        match self.entries.write() {
            Ok(mut map) => {
                map.remove(key);
            }
            Err(_) => warn!(key, "memory cache lock poisoned on delete"),
        }
    }

    async fn exists(&self, key: &str) -> bool {
        self.entries
            .read()
            .map(|map| map.contains_key(key))
            .unwrap_or(false)
    }

    async fn clear_pattern(&self, pattern: &str) -> u64 {
        // Linear scan with substring matching on the non-wildcard portion.
        let needle = pattern.replace('*', "");
        match self.entries.write() {
            Ok(mut map) => {
                let before = map.len();
                map.retain(|key, _| !key.contains(&needle));
                (before - map.len()) as u64
            }
            Err(_) => {
                warn!(pattern, "memory cache lock poisoned on clear_pattern");
                0
            }
        }
    }

    fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_round_trip() {
        let store = MemoryCacheStore::new();
        let value = json!({"x": 1, "tables": ["orders"]});

        store.set("query:abc", &value, None).await;
        assert_eq!(store.get("query:abc").await, Some(value));
    }

    #[tokio::test]
    async fn test_string_values_round_trip_unquoted() {
        let store = MemoryCacheStore::new();
        let summary = Value::String("Results (3 rows total, showing 3)".to_string());

        store.set("query:abc", &summary, None).await;
        assert_eq!(store.get("query:abc").await, Some(summary));
    }

    #[tokio::test]
    async fn test_ttl_is_ignored() {
        let store = MemoryCacheStore::new();
        store
            .set("k", &json!(1), Some(Duration::from_millis(1)))
            .await;

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.get("k").await, Some(json!(1)));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryCacheStore::new();
        store.set("k", &json!(true), None).await;

        store.delete("k").await;
        assert!(!store.exists("k").await);
        // Second delete of an absent key is a no-op.
        store.delete("k").await;
    }

    #[tokio::test]
    async fn test_exists() {
        let store = MemoryCacheStore::new();
        assert!(!store.exists("k").await);
        store.set("k", &json!("v"), None).await;
        assert!(store.exists("k").await);
    }

    #[tokio::test]
    async fn test_clear_pattern_substring_match() {
        let store = MemoryCacheStore::new();
        store.set("query:aaa", &json!(1), None).await;
        store.set("query:bbb", &json!(2), None).await;
        store.set("schema:orders", &json!(3), None).await;

        let deleted = store.clear_pattern("query:*").await;
        assert_eq!(deleted, 2);
        assert!(!store.exists("query:aaa").await);
        assert!(!store.exists("query:bbb").await);
        assert!(store.exists("schema:orders").await);
    }

    #[tokio::test]
    async fn test_clear_pattern_is_idempotent() {
        let store = MemoryCacheStore::new();
        store.set("query:aaa", &json!(1), None).await;
        store.set("schema:orders", &json!(2), None).await;

        assert_eq!(store.clear_pattern("query:*").await, 1);
        assert_eq!(store.clear_pattern("query:*").await, 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_stats_track_hits_and_misses() {
        let store = MemoryCacheStore::new();
        store.set("k", &json!(1), None).await;

        let _ = store.get("k").await;
        let _ = store.get("k").await;
        let _ = store.get("absent").await;

        let stats = store.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }
}
