//! Vantage Core - shared types
//!
//! Pure data structures and error enums for the Vantage query gateway.
//! All other crates depend on this. This crate contains ONLY data types
//! and configuration - no caching or execution logic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod config;
pub mod error;

pub use config::CacheSettings;
pub use error::{EngineError, ValidationError};

/// A single result row from the analytical engine: column name to value.
///
/// A `BTreeMap` keeps column order deterministic, so formatted summaries
/// (and therefore cached payloads) are stable across calls.
pub type Row = BTreeMap<String, serde_json::Value>;

/// One column of a table schema as reported by the engine.
///
/// The wire shape is `{name, type, mode, description}`; `description` is
/// frequently absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub mode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TableField {
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            mode: mode.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
