//! Cache control and conditional request handling
//!
//! `ETag` generation plus the two cache lifetimes the routes use: a short
//! public window for the catalog and a one-year immutable window for assets.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Catalog responses: 5 minutes
pub const CATALOG_MAX_AGE: u32 = 300;
/// Font asset responses: 1 year
pub const ASSET_MAX_AGE: u32 = 31_536_000;

/// Cache control policy for a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Public cache with specified max-age (seconds)
    Public(u32),
    /// Public cache that never revalidates within max-age
    Immutable(u32),
    /// No cache directive at all
    None,
}

impl CachePolicy {
    /// Convert to Cache-Control header value; `None` yields no header
    pub fn header_value(self) -> Option<String> {
        match self {
            Self::Public(max_age) => Some(format!("public, max-age={max_age}")),
            Self::Immutable(max_age) => Some(format!("public, max-age={max_age}, immutable")),
            Self::None => None,
        }
    }
}

/// Generate `ETag` using fast hashing
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check if client's `If-None-Match` header matches the server's `ETag`
///
/// Handles single tags, comma-separated lists, and the `*` wildcard.
/// Returns true if matched (should return 304).
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_header_values() {
        assert_eq!(
            CachePolicy::Public(CATALOG_MAX_AGE).header_value().unwrap(),
            "public, max-age=300"
        );
        assert_eq!(
            CachePolicy::Immutable(ASSET_MAX_AGE).header_value().unwrap(),
            "public, max-age=31536000, immutable"
        );
        assert!(CachePolicy::None.header_value().is_none());
    }

    #[test]
    fn test_generate_etag_is_quoted() {
        let etag = generate_etag(b"DejaVu Sans");
        assert!(etag.starts_with('"'));
        assert!(etag.ends_with('"'));
        assert!(etag.len() > 2);
    }

    #[test]
    fn test_etag_consistency() {
        assert_eq!(generate_etag(b"same content"), generate_etag(b"same content"));
        assert_ne!(generate_etag(b"content a"), generate_etag(b"content b"));
    }

    #[test]
    fn test_check_etag_match() {
        let etag = "\"abc123\"";
        assert!(check_etag_match(Some("\"abc123\""), etag));
        assert!(check_etag_match(Some("\"xyz\", \"abc123\""), etag));
        assert!(check_etag_match(Some("*"), etag));
        assert!(!check_etag_match(Some("\"different\""), etag));
        assert!(!check_etag_match(None, etag));
    }
}
