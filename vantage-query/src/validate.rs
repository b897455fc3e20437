//! Pre-execution statement validation.
//!
//! Rejects statements containing destructive operations before they reach
//! the engine. Matching is on standalone whitespace-bounded tokens, so a
//! table named `dropbox_data` never trips the `drop` rule.

use tracing::warn;
use vantage_core::ValidationError;

/// Keywords whose presence anywhere in a statement causes rejection.
/// Checked in order; the first match is the one reported.
const FORBIDDEN_KEYWORDS: [&str; 7] = [
    "drop", "delete", "truncate", "insert", "update", "alter", "create",
];

/// Validate raw query text before execution.
///
/// Fails with [`ValidationError::EmptyQuery`] on blank input and
/// [`ValidationError::ForbiddenOperation`] when a denylisted keyword
/// appears as a standalone word. A statement that does not start with
/// `select` or `with` is flagged in the log but still accepted - the
/// engine's own grammar is the authority on what runs.
pub fn validate(text: &str) -> Result<(), ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }

    let lowered = trimmed.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    for keyword in FORBIDDEN_KEYWORDS {
        if tokens.iter().any(|token| *token == keyword) {
            return Err(ValidationError::ForbiddenOperation {
                keyword: keyword.to_string(),
            });
        }
    }

    // Advisory only: unusual leading keyword, execution proceeds.
    if let Some(first) = tokens.first() {
        if *first != "select" && *first != "with" {
            warn!(leading = %first, "statement does not start with select/with");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_rejected() {
        assert_eq!(validate(""), Err(ValidationError::EmptyQuery));
        assert_eq!(validate("   \n\t "), Err(ValidationError::EmptyQuery));
    }

    #[test]
    fn test_forbidden_keywords_rejected() {
        for keyword in FORBIDDEN_KEYWORDS {
            let statement = format!("{} TABLE orders", keyword.to_uppercase());
            assert_eq!(
                validate(&statement),
                Err(ValidationError::ForbiddenOperation {
                    keyword: keyword.to_string(),
                }),
                "expected rejection for {keyword}"
            );
        }
    }

    #[test]
    fn test_forbidden_keyword_mid_statement() {
        assert_eq!(
            validate("SELECT 1; DROP TABLE orders"),
            Err(ValidationError::ForbiddenOperation {
                keyword: "drop".to_string(),
            })
        );
    }

    #[test]
    fn test_denylist_order_breaks_ties() {
        // Both `drop` and `create` appear; denylist order reports `drop`.
        assert_eq!(
            validate("CREATE TABLE t AS SELECT 1; DROP TABLE t"),
            Err(ValidationError::ForbiddenOperation {
                keyword: "drop".to_string(),
            })
        );
    }

    #[test]
    fn test_substring_does_not_match() {
        assert!(validate("SELECT * FROM dropbox_data").is_ok());
        assert!(validate("SELECT updated_at FROM orders").is_ok());
        assert!(validate("SELECT created_by FROM audit_log").is_ok());
    }

    #[test]
    fn test_select_and_with_accepted() {
        assert!(validate("SELECT 1").is_ok());
        assert!(validate("WITH cte AS (SELECT 1) SELECT * FROM cte").is_ok());
    }

    #[test]
    fn test_unusual_leading_keyword_is_advisory_only() {
        // Flagged in the log, but not rejected.
        assert!(validate("EXPLAIN SELECT 1").is_ok());
    }
}
