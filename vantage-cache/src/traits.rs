//! Cache store trait and shared value encoding.
//!
//! Both backends implement [`CacheStore`] with the same absorbing failure
//! semantics: internal backend errors degrade to a miss on read and a no-op
//! on write, logged at warn level. Only construction-time connectivity
//! failure surfaces, and only to the composition root (see `connect.rs`).

use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Backend-agnostic cache store.
///
/// Implementations must be safe for concurrent use without external
/// locking. `get`/`set`/`delete`/`clear_pattern` never fail the caller.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a stored value, or `None` on absence, expiry, or backend error.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store a value. Non-string values are JSON-encoded.
    ///
    /// TTL handling is backend-specific: the remote backend applies its
    /// configured default when `ttl` is `None`; the in-memory backend
    /// ignores TTLs entirely.
    async fn set(&self, key: &str, value: &Value, ttl: Option<Duration>);

    /// Remove a key. Idempotent; absent keys are not an error.
    async fn delete(&self, key: &str);

    /// Whether a key is currently present.
    async fn exists(&self, key: &str) -> bool;

    /// Delete every key matching a glob pattern (`*` wildcard).
    ///
    /// Returns the number of keys deleted.
    async fn clear_pattern(&self, pattern: &str) -> u64;

    /// Snapshot of hit/miss counters.
    fn stats(&self) -> CacheStats;
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses (including absorbed backend errors).
    pub misses: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Atomic hit/miss counters shared by both backends.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Encode a value for storage as UTF-8 text.
///
/// String values are stored as-is so they round-trip without JSON quoting;
/// everything else is JSON-encoded.
pub(crate) fn encode_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decode stored text back into a value.
///
/// Falls back to returning the raw string when the payload is not valid
/// JSON (which is the common case for plain-text summaries).
pub(crate) fn decode_value(raw: String) -> Value {
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(_) => Value::String(raw),
    }
}
