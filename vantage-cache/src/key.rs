//! Deterministic cache-key derivation.
//!
//! Keys are partitioned by a namespace prefix so unrelated cached artifacts
//! never collide and a pattern clear in one namespace never evicts another.
//! Free-text inputs (query statements) are whitespace-normalized and
//! lower-cased before hashing, so trivially reformatted queries share a key.

use sha2::{Digest, Sha256};

/// Namespace for cached query-result summaries.
pub const NS_QUERY: &str = "query";
/// Namespace for the cached table listing.
pub const NS_TABLES: &str = "tables";
/// Namespace for cached table schemas.
pub const NS_SCHEMA: &str = "schema";

/// Normalize free-text input: collapse whitespace runs to a single space,
/// trim, and lower-case.
pub fn normalize_statement(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Derive a hashed cache key from free-text parts.
///
/// Each part is normalized, the parts are joined with `:`, and the result
/// is Sha256-hashed and hex-encoded under the namespace prefix. Pure
/// function: equal inputs (after normalization) always yield equal keys.
pub fn derive(namespace: &str, parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .map(|part| normalize_statement(part))
        .collect::<Vec<_>>()
        .join(":");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    format!("{}:{}", namespace, hex::encode(hasher.finalize()))
}

/// Build a literal key from structured identifiers (dataset or table names).
///
/// Identifiers are used verbatim, joined with `:`. No hashing - the key
/// stays human-readable in the backend key space.
pub fn identifier_key(namespace: &str, parts: &[&str]) -> String {
    let mut key = String::from(namespace);
    for part in parts {
        key.push(':');
        key.push_str(part);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(
            normalize_statement("  SELECT  *\n FROM\t orders  "),
            "select * from orders"
        );
        assert_eq!(normalize_statement(""), "");
    }

    #[test]
    fn test_derive_is_deterministic() {
        let a = derive(NS_QUERY, &["SELECT 1"]);
        let b = derive(NS_QUERY, &["SELECT 1"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_equal_after_normalization() {
        let a = derive(NS_QUERY, &["SELECT * FROM orders"]);
        let b = derive(NS_QUERY, &["  select *\n\tFROM   orders "]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_distinct_inputs_differ() {
        let a = derive(NS_QUERY, &["SELECT 1"]);
        let b = derive(NS_QUERY, &["SELECT 2"]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_namespaces_never_collide() {
        let q = derive(NS_QUERY, &["orders"]);
        let s = derive(NS_SCHEMA, &["orders"]);
        assert!(q.starts_with("query:"));
        assert!(s.starts_with("schema:"));
        assert_ne!(q, s);
    }

    #[test]
    fn test_identifier_key_is_verbatim() {
        assert_eq!(
            identifier_key(NS_SCHEMA, &["Orders_2024"]),
            "schema:Orders_2024"
        );
        assert_eq!(identifier_key(NS_TABLES, &["all"]), "tables:all");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(text in ".{0,200}") {
            let once = normalize_statement(&text);
            prop_assert_eq!(normalize_statement(&once), once);
        }

        #[test]
        fn prop_derive_ignores_whitespace_shape(
            words in proptest::collection::vec("[a-z0-9_*=]{1,8}", 1..8),
            seps in proptest::collection::vec("[ \t\n]{1,3}", 8),
        ) {
            let plain = words.join(" ");
            let mut noisy = String::new();
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    noisy.push_str(&seps[i % seps.len()]);
                }
                noisy.push_str(word);
            }
            prop_assert_eq!(
                derive(NS_QUERY, &[&plain]),
                derive(NS_QUERY, &[&noisy])
            );
        }
    }
}
