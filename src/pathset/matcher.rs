//! Wildcard coverage checks over path segments.
//!
//! # Responsibilities
//! - Decide whether a rule pattern covers a concrete or wildcarded path
//! - Distinguish wildcard entries from plain literals
//!
//! # Design Decisions
//! - Segment-by-segment comparison, no compiled patterns: no escaping
//!   pitfalls, O(segments) per check
//! - Only a segment that is exactly `*` is a wildcard; `@*` or `v*` are
//!   ordinary literals at this level
//! - An internal `*` stands for exactly one segment
//! - A terminal `*` is inclusive: `/a/b/*` covers `/a/b` itself as well as
//!   everything beneath it

use crate::pathset::normalize::segments;

/// The wildcard segment token.
pub const WILDCARD: &str = "*";

/// True if any segment of `path` is the wildcard token.
pub fn is_wildcard(path: &str) -> bool {
    segments(path).iter().any(|s| *s == WILDCARD)
}

/// True if `path` ends in a subtree wildcard segment.
pub fn is_subtree(path: &str) -> bool {
    segments(path).last() == Some(&WILDCARD)
}

/// True if `rule` covers `path`.
///
/// `path` may itself contain wildcards; they only match a literal `*` in
/// the rule or a wildcard segment at the same position. A rule never covers
/// an equal path's siblings by accident: literal segments must match
/// byte-for-byte and segment counts must line up unless the rule ends in a
/// subtree wildcard.
pub fn covers(path: &str, rule: &str) -> bool {
    let rule_segs = segments(rule);
    let path_segs = segments(path);

    for (i, rule_seg) in rule_segs.iter().enumerate() {
        let terminal = i + 1 == rule_segs.len();
        if *rule_seg == WILDCARD && terminal {
            // Subtree wildcard: the remainder may be empty (the base path
            // itself) or arbitrarily deep.
            return path_segs.len() >= i;
        }
        match path_segs.get(i) {
            None => return false,
            Some(path_seg) => {
                if *rule_seg != WILDCARD && rule_seg != path_seg {
                    return false;
                }
            }
        }
    }

    path_segs.len() == rule_segs.len()
}
