//! Cached query executor.
//!
//! Orchestrates validation, cache lookup, engine delegation, and cache
//! population. Every public method returns a textual answer: validation
//! rejections and engine failures come back as formatted strings, never as
//! errors or panics.
//!
//! Concurrency: the executor is stateless and safe to share. There is no
//! critical section around the check/execute/store sequence - two
//! concurrent identical misses may both run the query, and both writes are
//! idempotent overwrites of identical content.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use vantage_cache::key::{self, NS_QUERY, NS_SCHEMA, NS_TABLES};
use vantage_cache::CacheStore;

use crate::engine::QueryEngine;
use crate::format;
use crate::validate;

/// TTL for cached query-result summaries.
const QUERY_RESULT_TTL: Duration = Duration::from_secs(5 * 60);
/// TTL for the cached table listing.
const TABLE_LIST_TTL: Duration = Duration::from_secs(30 * 60);
/// TTL for cached table schemas.
const TABLE_SCHEMA_TTL: Duration = Duration::from_secs(60 * 60);

/// Executor that fronts a [`QueryEngine`] with caching and validation.
///
/// Holds shared references to exactly one cache store and one engine
/// client; it does not manage their lifecycles.
pub struct CachedQueryExecutor {
    cache: Arc<dyn CacheStore>,
    engine: Arc<dyn QueryEngine>,
}

impl CachedQueryExecutor {
    pub fn new(cache: Arc<dyn CacheStore>, engine: Arc<dyn QueryEngine>) -> Self {
        Self { cache, engine }
    }

    /// Run a query, serving from cache when possible.
    ///
    /// Order matters: a cache hit short-circuits before validation, a
    /// rejected statement never reaches the engine, and an engine failure
    /// is returned as a formatted error string.
    pub async fn run_query(&self, query: &str, use_cache: bool) -> String {
        let cache_key = key::derive(NS_QUERY, &[query]);

        if use_cache {
            if let Some(cached) = self.cache.get(&cache_key).await {
                debug!(key = %cache_key, "query cache hit");
                return value_to_text(cached);
            }
            debug!(key = %cache_key, "query cache miss");
        }

        if let Err(e) = validate::validate(query) {
            warn!(error = %e, "query rejected before execution");
            return format!("Query rejected: {}", e);
        }

        match self.engine.execute(query).await {
            Ok(rows) => {
                let summary = format::format_rows(&rows);
                if use_cache {
                    self.cache
                        .set(
                            &cache_key,
                            &Value::String(summary.clone()),
                            Some(QUERY_RESULT_TTL),
                        )
                        .await;
                }
                summary
            }
            Err(e) => {
                error!(error = %e, "engine execution failed");
                format!("Error executing query: {}", e)
            }
        }
    }

    /// List available tables, cached for thirty minutes.
    pub async fn list_tables(&self, use_cache: bool) -> String {
        let cache_key = key::identifier_key(NS_TABLES, &["all"]);

        if use_cache {
            if let Some(cached) = self.cache.get(&cache_key).await {
                debug!(key = %cache_key, "table list cache hit");
                return value_to_text(cached);
            }
            debug!(key = %cache_key, "table list cache miss");
        }

        match self.engine.fetch_table_list().await {
            Ok(tables) => {
                let listing = format::format_table_list(&tables);
                if use_cache {
                    self.cache
                        .set(
                            &cache_key,
                            &Value::String(listing.clone()),
                            Some(TABLE_LIST_TTL),
                        )
                        .await;
                }
                listing
            }
            Err(e) => {
                error!(error = %e, "table listing failed");
                format!("Error fetching table list: {}", e)
            }
        }
    }

    /// Fetch a table's schema, cached for one hour.
    pub async fn table_schema(&self, table: &str, use_cache: bool) -> String {
        let cache_key = key::identifier_key(NS_SCHEMA, &[table]);

        if use_cache {
            if let Some(cached) = self.cache.get(&cache_key).await {
                debug!(key = %cache_key, "schema cache hit");
                return value_to_text(cached);
            }
            debug!(key = %cache_key, "schema cache miss");
        }

        match self.engine.fetch_table_schema(table).await {
            Ok(fields) => {
                let rendered = format::format_schema(table, &fields);
                if use_cache {
                    self.cache
                        .set(
                            &cache_key,
                            &Value::String(rendered.clone()),
                            Some(TABLE_SCHEMA_TTL),
                        )
                        .await;
                }
                rendered
            }
            Err(e) => {
                error!(table, error = %e, "schema fetch failed");
                format!("Error fetching schema for '{}': {}", table, e)
            }
        }
    }

    /// Clear cached entries by pattern.
    ///
    /// With no pattern, clears only the executor's own namespaces, never
    /// the whole backend key space. Returns the number of keys deleted.
    pub async fn clear_cache(&self, pattern: Option<&str>) -> u64 {
        match pattern {
            Some(pattern) => self.cache.clear_pattern(pattern).await,
            None => {
                let mut deleted = 0;
                for namespace in [NS_QUERY, NS_TABLES, NS_SCHEMA] {
                    deleted += self
                        .cache
                        .clear_pattern(&format!("{}:*", namespace))
                        .await;
                }
                deleted
            }
        }
    }
}

/// Cached payloads are stored as text; anything that decoded to a non-string
/// JSON value renders back as JSON.
fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
