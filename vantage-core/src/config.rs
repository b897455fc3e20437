//! Cache configuration
//!
//! Settings are loaded from environment variables with sensible defaults
//! for development. The cache backend URL points at a local Redis by
//! default; when that backend is unreachable the gateway degrades to an
//! in-process store rather than failing.

use std::time::Duration;

/// Settings for the cache layer.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Redis connection URL, e.g. `redis://127.0.0.1:6379/0`.
    pub url: String,

    /// How long to wait for the connectivity check at construction.
    pub connect_timeout: Duration,

    /// TTL applied by the remote backend when a caller passes no TTL.
    /// The in-memory fallback ignores TTLs entirely.
    pub default_ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379/0".to_string(),
            connect_timeout: Duration::from_secs(5),
            default_ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl CacheSettings {
    /// Create CacheSettings from environment variables.
    ///
    /// Environment variables:
    /// - `VANTAGE_REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379/0`)
    /// - `VANTAGE_REDIS_CONNECT_TIMEOUT_SECS`: connectivity-check timeout (default: 5)
    /// - `VANTAGE_CACHE_DEFAULT_TTL_SECS`: default entry TTL (default: 3600)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let url = std::env::var("VANTAGE_REDIS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.url);

        let connect_timeout = std::env::var("VANTAGE_REDIS_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.connect_timeout);

        let default_ttl = std::env::var("VANTAGE_CACHE_DEFAULT_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.default_ttl);

        Self {
            url,
            connect_timeout,
            default_ttl,
        }
    }

    /// Override the connection URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Override the connectivity-check timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Override the default TTL.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = CacheSettings::default();
        assert_eq!(settings.url, "redis://127.0.0.1:6379/0");
        assert_eq!(settings.connect_timeout, Duration::from_secs(5));
        assert_eq!(settings.default_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_builder_overrides() {
        let settings = CacheSettings::default()
            .with_url("redis://cache.internal:6380/1")
            .with_connect_timeout(Duration::from_secs(2))
            .with_default_ttl(Duration::from_secs(60));

        assert_eq!(settings.url, "redis://cache.internal:6380/1");
        assert_eq!(settings.connect_timeout, Duration::from_secs(2));
        assert_eq!(settings.default_ttl, Duration::from_secs(60));
    }
}
