//! Error types for Vantage operations

use thiserror::Error;

/// Validation errors raised before a statement ever reaches the engine.
///
/// These are reported back to the caller as a rejected result and never
/// retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("query text is empty")]
    EmptyQuery,

    #[error("query contains forbidden operation '{keyword}'")]
    ForbiddenOperation { keyword: String },
}

/// Failures reported by the underlying analytical engine.
///
/// The executor converts these into formatted failure strings; they are
/// never propagated past the gateway boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("query execution failed: {reason}")]
    ExecutionFailed { reason: String },

    #[error("failed to list tables: {reason}")]
    TableListFailed { reason: String },

    #[error("failed to fetch schema for '{table}': {reason}")]
    SchemaFetchFailed { table: String, reason: String },
}
