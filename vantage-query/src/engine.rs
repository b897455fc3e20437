//! Seam to the remote analytical engine.
//!
//! Implementations wrap whatever client the application uses (warehouse
//! SDK, HTTP gateway, test double). The executor only depends on the
//! shapes defined here.

use async_trait::async_trait;
use vantage_core::{EngineError, Row, TableField};

/// Client for the underlying analytical query engine.
///
/// Implementations must be thread-safe (`Send + Sync`); all calls are
/// potentially blocking network operations governed by the engine's own
/// timeout policy.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Execute a query and return its rows.
    async fn execute(&self, query: &str) -> Result<Vec<Row>, EngineError>;

    /// List the tables available in the configured dataset.
    async fn fetch_table_list(&self) -> Result<Vec<String>, EngineError>;

    /// Fetch the column schema of a single table.
    async fn fetch_table_schema(&self, table: &str) -> Result<Vec<TableField>, EngineError>;
}
