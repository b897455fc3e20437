//! Vantage Cache - key derivation and cache backends
//!
//! This crate provides the cache layer that sits between the query gateway
//! and the analytical engine:
//!
//! - [`key`]: deterministic cache-key derivation from query text and
//!   resource identifiers, partitioned by namespace.
//! - [`CacheStore`]: the backend-agnostic store trait. Per-operation backend
//!   errors are absorbed inside the store (a failed read is a miss, a failed
//!   write is a no-op) so the cache can never make the gateway unavailable.
//! - [`RedisCacheStore`]: the networked backend. One shared connection per
//!   process, TTL-based expiry, bounded `SCAN` batches for pattern clears.
//! - [`MemoryCacheStore`]: the process-local fallback. No TTL enforcement;
//!   entries live until deleted or the process exits.
//! - [`connect_with_fallback`]: the composition root. Picks the backend once
//!   at construction time - Redis when reachable, memory otherwise.

pub mod connect;
pub mod key;
pub mod memory_backend;
pub mod redis_backend;
pub mod traits;

pub use connect::connect_with_fallback;
pub use memory_backend::MemoryCacheStore;
pub use redis_backend::{RedisCacheError, RedisCacheStore};
pub use traits::{CacheStats, CacheStore};
