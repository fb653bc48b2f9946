//! Path normalization and segmentation.
//!
//! # Responsibilities
//! - Guarantee a leading separator on every entry
//! - Produce the stable byte-lexicographic ordering the optimizer scans in
//! - Split paths into segment lists for the matcher and condenser
//!
//! # Design Decisions
//! - No deduplication here; the optimizer owns that
//! - Byte ordering (not locale-aware) so output is reproducible everywhere
//! - The root path `/` has zero segments

/// Prefix a path with `/` unless it already starts with one.
pub fn normalize(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Normalize every entry and sort the result ascending by byte value.
///
/// Duplicates survive; the optimizer drops them on its pass.
pub fn normalize_and_sort<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = paths
        .into_iter()
        .map(|p| normalize(p.as_ref()))
        .collect();
    normalized.sort();
    normalized
}

/// Split a path into its segments.
///
/// Leading separators are ignored, so `/api/users` and `api/users` both
/// yield `["api", "users"]`. The root path yields an empty list.
pub fn segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_leading_slash() {
        assert_eq!(normalize("api/users"), "/api/users");
        assert_eq!(normalize("/api/users"), "/api/users");
        assert_eq!(normalize(""), "/");
    }

    #[test]
    fn test_normalize_and_sort_is_byte_order() {
        let sorted = normalize_and_sort(["/b", "a", "/a/*", "/a"]);
        assert_eq!(sorted, vec!["/a", "/a", "/a/*", "/b"]);
    }

    #[test]
    fn test_wildcard_sorts_before_letters() {
        // '*' is 0x2A, below every ASCII letter, so wildcarded siblings
        // come first in the scan order.
        let sorted = normalize_and_sort(["/api/users", "/api/*"]);
        assert_eq!(sorted, vec!["/api/*", "/api/users"]);
    }

    #[test]
    fn test_segments_of_root_is_empty() {
        assert!(segments("/").is_empty());
        assert!(segments("").is_empty());
    }

    #[test]
    fn test_segments_split() {
        assert_eq!(segments("/api/users/*"), vec!["api", "users", "*"]);
        assert_eq!(segments("api/users"), vec!["api", "users"]);
        assert_eq!(segments("/*"), vec!["*"]);
    }
}
