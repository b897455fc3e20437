//! Redis-backed cache store.
//!
//! One `ConnectionManager` is built per process at construction time and
//! shared across all calls; cloning the manager is a cheap handle copy onto
//! the same multiplexed connection. Reconnecting per call is disallowed.
//!
//! Construction performs a `PING` connectivity check under a short timeout.
//! That check is the only cache error that surfaces to callers - every
//! per-operation error afterwards is absorbed into a miss or no-op and
//! logged at warn level.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use vantage_core::CacheSettings;

use crate::traits::{decode_value, encode_value, CacheStats, CacheStore, StatsCounters};

/// Number of keys requested per `SCAN` batch during pattern clears.
const SCAN_BATCH_SIZE: usize = 100;

/// Errors raised while establishing the Redis connection.
///
/// These only occur at construction; the composition root reacts by
/// substituting the in-memory fallback (see `connect.rs`).
#[derive(Debug, thiserror::Error)]
pub enum RedisCacheError {
    #[error("invalid Redis URL: {0}")]
    InvalidUrl(String),

    #[error("failed to connect to Redis: {0}")]
    ConnectFailed(String),

    #[error("Redis did not respond within {0:?}")]
    ConnectTimeout(Duration),
}

/// Cache store backed by a shared Redis connection.
pub struct RedisCacheStore {
    conn: ConnectionManager,
    default_ttl: Duration,
    stats: StatsCounters,
}

impl RedisCacheStore {
    /// Connect to Redis and verify the connection with a `PING`.
    ///
    /// The whole handshake is bounded by `settings.connect_timeout`.
    pub async fn connect(settings: &CacheSettings) -> Result<Self, RedisCacheError> {
        let client = redis::Client::open(settings.url.as_str())
            .map_err(|e| RedisCacheError::InvalidUrl(e.to_string()))?;

        let mut conn = tokio::time::timeout(
            settings.connect_timeout,
            ConnectionManager::new(client),
        )
        .await
        .map_err(|_| RedisCacheError::ConnectTimeout(settings.connect_timeout))?
        .map_err(|e| RedisCacheError::ConnectFailed(e.to_string()))?;

        tokio::time::timeout(
            settings.connect_timeout,
            redis::cmd("PING").query_async::<String>(&mut conn),
        )
        .await
        .map_err(|_| RedisCacheError::ConnectTimeout(settings.connect_timeout))?
        .map_err(|e| RedisCacheError::ConnectFailed(e.to_string()))?;

        info!(url = %settings.url, "connected to Redis cache backend");

        Ok(Self {
            conn,
            default_ttl: settings.default_ttl,
            stats: StatsCounters::default(),
        })
    }

    /// TTL in whole seconds for `SETEX`, falling back to the configured
    /// default and clamped to at least one second.
    fn ttl_seconds(&self, ttl: Option<Duration>) -> u64 {
        ttl.unwrap_or(self.default_ttl).as_secs().max(1)
    }

    async fn try_get(&self, key: &str) -> redis::RedisResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(key).await
    }

    async fn try_set(&self, key: &str, payload: &str, ttl_secs: u64) -> redis::RedisResult<()> {
        let mut conn = self.conn.clone();
        conn.set_ex(key, payload, ttl_secs).await
    }

    async fn try_delete(&self, key: &str) -> redis::RedisResult<()> {
        let mut conn = self.conn.clone();
        conn.del(key).await
    }

    async fn try_exists(&self, key: &str) -> redis::RedisResult<bool> {
        let mut conn = self.conn.clone();
        conn.exists(key).await
    }

    /// Delete keys matching a pattern using incremental `SCAN` batches, so
    /// large key spaces never block the backend on a single listing call.
    async fn try_clear_pattern(&self, pattern: &str) -> redis::RedisResult<u64> {
        let mut conn = self.conn.clone();
        let mut cursor = 0u64;
        let mut deleted = 0u64;

        loop {
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut conn)
                .await?;

            if !keys.is_empty() {
                let removed: u64 = conn.del(&keys).await?;
                deleted += removed;
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        Ok(deleted)
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Option<Value> {
        match self.try_get(key).await {
            Ok(Some(raw)) => {
                self.stats.record_hit();
                Some(decode_value(raw))
            }
            Ok(None) => {
                self.stats.record_miss();
                None
            }
            Err(e) => {
                self.stats.record_miss();
                warn!(key, error = %e, "cache get failed, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &Value, ttl: Option<Duration>) {
        let payload = encode_value(value);
        let ttl_secs = self.ttl_seconds(ttl);

        match self.try_set(key, &payload, ttl_secs).await {
            Ok(()) => debug!(key, ttl_secs, "cached value"),
            Err(e) => warn!(key, error = %e, "cache set failed, skipping"),
        }
    }

    async fn delete(&self, key: &str) {
        if let Err(e) = self.try_delete(key).await {
            warn!(key, error = %e, "cache delete failed, skipping");
        }
    }

    async fn exists(&self, key: &str) -> bool {
        match self.try_exists(key).await {
            Ok(present) => present,
            Err(e) => {
                warn!(key, error = %e, "cache exists check failed");
                false
            }
        }
    }

    async fn clear_pattern(&self, pattern: &str) -> u64 {
        match self.try_clear_pattern(pattern).await {
            Ok(deleted) => {
                info!(pattern, deleted, "cleared cache keys by pattern");
                deleted
            }
            Err(e) => {
                warn!(pattern, error = %e, "pattern clear failed, skipping");
                0
            }
        }
    }

    fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
