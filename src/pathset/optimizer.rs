//! Single-pass redundancy removal.
//!
//! # Responsibilities
//! - Drop duplicate entries
//! - Drop entries already covered by an accepted wildcard
//! - Evict previously accepted entries when a broader wildcard arrives
//!
//! # Design Decisions
//! - One forward scan over the byte-sorted input; the sort puts `*` ahead
//!   of its literal siblings so most coverage is decided before literals
//!   are even considered
//! - Output stays sorted because acceptance preserves scan order and
//!   eviction only removes
//! - Idempotent: running the pass on its own output changes nothing

use crate::pathset::matcher::{covers, is_wildcard};
use crate::pathset::normalize::normalize_and_sort;

/// Reduce a raw path inventory to its minimal covering set.
///
/// Entries are normalized and sorted first, so callers may pass paths in
/// any order and with or without leading separators.
pub fn optimize<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let sorted = normalize_and_sort(paths);
    let mut accepted: Vec<String> = Vec::new();

    for candidate in sorted {
        if accepted.contains(&candidate) {
            continue;
        }
        if accepted
            .iter()
            .any(|kept| is_wildcard(kept) && covers(&candidate, kept))
        {
            continue;
        }
        if is_wildcard(&candidate) {
            // A newly accepted wildcard may subsume entries that were
            // accepted before it appeared in the scan.
            accepted.retain(|kept| !covers(kept, &candidate));
        }
        accepted.push(candidate);
    }

    accepted
}
