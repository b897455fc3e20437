//! Cache backend selection.
//!
//! The composition root decides once, at construction time, which store the
//! gateway uses. There is no per-call fallback branch: whichever backend is
//! chosen here serves the whole process lifetime.

use std::sync::Arc;
use tracing::warn;

use vantage_core::CacheSettings;

use crate::memory_backend::MemoryCacheStore;
use crate::redis_backend::RedisCacheStore;
use crate::traits::CacheStore;

/// Connect to the configured Redis backend, degrading to the in-memory
/// store when it is unreachable.
///
/// Never fails: the cache layer is not allowed to make the gateway
/// unavailable. The degradation is logged so operators can tell which
/// backend is live.
pub async fn connect_with_fallback(settings: &CacheSettings) -> Arc<dyn CacheStore> {
    match RedisCacheStore::connect(settings).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                url = %settings.url,
                error = %e,
                "Redis unreachable, falling back to in-memory cache"
            );
            Arc::new(MemoryCacheStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_fallback_when_backend_unreachable() {
        // Nothing listens on this port; the connect attempt fails fast and
        // the returned store must behave per the in-memory contract.
        let settings = CacheSettings::default()
            .with_url("redis://127.0.0.1:1/0")
            .with_connect_timeout(Duration::from_millis(500));

        let store = connect_with_fallback(&settings).await;

        store.set("query:k", &json!({"x": 1}), None).await;
        assert_eq!(store.get("query:k").await, Some(json!({"x": 1})));
        assert!(store.exists("query:k").await);
    }

    #[tokio::test]
    async fn test_fallback_on_invalid_url() {
        let settings = CacheSettings::default()
            .with_url("not-a-redis-url")
            .with_connect_timeout(Duration::from_millis(500));

        let store = connect_with_fallback(&settings).await;
        store.set("k", &json!("v"), None).await;
        assert_eq!(store.get("k").await, Some(json!("v")));
    }
}
