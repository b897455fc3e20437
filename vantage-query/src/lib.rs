//! Vantage Query - validation and cached execution
//!
//! The orchestration layer in front of the analytical engine:
//!
//! - [`validate`]: denylist-based statement validation, run before any
//!   statement reaches the engine.
//! - [`QueryEngine`]: the seam to the remote engine. Implementations are
//!   external collaborators; this crate only depends on the row and schema
//!   shapes they return.
//! - [`CachedQueryExecutor`]: checks the cache, validates, delegates to the
//!   engine on miss, and writes formatted results back with per-operation
//!   TTLs. Always returns a textual answer - engine failures come back as
//!   formatted error strings, never as panics or propagated errors.

pub mod engine;
pub mod executor;
pub mod format;
pub mod validate;

pub use engine::QueryEngine;
pub use executor::CachedQueryExecutor;
