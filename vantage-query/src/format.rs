//! Human-readable rendering of engine results.
//!
//! The executor caches these rendered strings, not raw rows, so rendering
//! must be deterministic. Row column order is stable because [`Row`] is a
//! `BTreeMap`.

use serde_json::Value;
use vantage_core::{Row, TableField};

/// Maximum number of rows rendered in a query summary. The true total is
/// always reported alongside.
pub const MAX_DISPLAY_ROWS: usize = 10;

/// Render query rows into a bounded summary.
pub fn format_rows(rows: &[Row]) -> String {
    if rows.is_empty() {
        return "No results found for the query.".to_string();
    }

    let shown = rows.len().min(MAX_DISPLAY_ROWS);
    let mut out = format!(
        "Results ({} rows total, showing {}):\n\n",
        rows.len(),
        shown
    );

    for (i, row) in rows.iter().take(MAX_DISPLAY_ROWS).enumerate() {
        out.push_str(&format!("Row {}:\n", i + 1));
        for (column, value) in row {
            out.push_str(&format!("  {}: {}\n", column, render_value(value)));
        }
        out.push('\n');
    }

    out
}

/// Render the table listing.
pub fn format_table_list(tables: &[String]) -> String {
    if tables.is_empty() {
        return "No tables available in the dataset.".to_string();
    }
    format!("Available tables: {}", tables.join(", "))
}

/// Render a table schema, one line per column.
pub fn format_schema(table: &str, fields: &[TableField]) -> String {
    let mut out = format!("Schema for table '{}':\n\n", table);
    for field in fields {
        out.push_str(&format!(
            "- {} ({}) - {}",
            field.name, field.field_type, field.mode
        ));
        if let Some(description) = &field.description {
            out.push_str(&format!(" - {}", description));
        }
        out.push('\n');
    }
    out
}

/// Scalar values render bare; anything structured renders as JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
