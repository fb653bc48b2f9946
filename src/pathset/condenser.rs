//! Sibling collapse for path sets that are still too large.
//!
//! # Responsibilities
//! - Fold entries that share an ancestor into one subtree wildcard
//! - Merge subtree wildcards that share a leading branch
//! - Keep `/` and `/*` apart so exempting the root stays possible
//!
//! # Design Decisions
//! - Deliberately lossy: the result covers strictly more than the input,
//!   trading precision for expression size
//! - Groups are built in `BTreeMap`s so two runs over the same input
//!   produce byte-identical output
//! - Applied repeatedly it reaches a fixed point; the compactor relies on
//!   that to terminate

use std::collections::BTreeMap;

use crate::pathset::matcher::{covers, is_subtree, WILDCARD};
use crate::pathset::normalize::segments;

const ROOT: &str = "/";
const ROOT_WILDCARD: &str = "/*";
const SUBTREE_SUFFIX: &str = "/*";

/// Coverage check with the root exemption: the root wildcard never counts
/// as covering the bare root path, so `/` survives next to `/*`.
fn covers_except_root(path: &str, rule: &str) -> bool {
    if rule == ROOT_WILDCARD && path == ROOT {
        return false;
    }
    covers(path, rule)
}

/// Two-segment grouping key for entries that do not end in a subtree
/// wildcard. `/mailcoach/123/subscribers` and `/mailcoach/123/campaigns`
/// both key to `mailcoach/123`.
fn group_key(path: &str) -> String {
    let segs = segments(path);
    match segs.len() {
        0 => String::new(),
        1 => segs[0].to_string(),
        _ => format!("{}/{}", segs[0], segs[1]),
    }
}

/// Collapse siblings into broader wildcards.
///
/// Exact entries and internally wildcarded entries are grouped under their
/// first two segments; each group becomes either the key itself (when every
/// member already equals it) or the key plus a subtree wildcard. Groups
/// whose key is covered by a subtree wildcard already in the set are
/// dropped outright. Subtree wildcards sharing a first segment merge into
/// their longest common segment prefix.
pub fn condense<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (subtrees, others): (Vec<String>, Vec<String>) = paths
        .into_iter()
        .map(|p| p.as_ref().to_string())
        .partition(|p| is_subtree(p));

    let mut result: Vec<String> = Vec::new();

    // Exact and internally wildcarded entries, folded per two-segment branch.
    let mut branches: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for path in others {
        branches.entry(group_key(&path)).or_default().push(path);
    }
    for (key, members) in branches {
        let key_path = format!("/{key}");
        if subtrees.iter().any(|w| covers_except_root(&key_path, w)) {
            // The whole branch already sits under a subtree wildcard.
            continue;
        }
        if members.iter().all(|m| *m == key_path) {
            result.push(key_path);
        } else {
            result.push(format!("{key_path}{SUBTREE_SUFFIX}"));
        }
    }

    // Subtree wildcards, merged per leading segment.
    let mut wild_branches: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for path in subtrees {
        let key = segments(&path)
            .first()
            .map(|s| s.to_string())
            .unwrap_or_default();
        wild_branches.entry(key).or_default().push(path);
    }
    for (key, mut members) in wild_branches {
        if members.len() == 1 {
            result.push(members.remove(0));
            continue;
        }
        let prefix = common_segment_prefix(&members);
        if prefix.is_empty() {
            result.push(format!("/{key}{SUBTREE_SUFFIX}"));
        } else if prefix.last().map(String::as_str) == Some(WILDCARD) {
            // The shared prefix already ends in a wildcard; appending
            // another would widen `/a/*` into `/a/*/*` for nothing.
            result.push(format!("/{}", prefix.join("/")));
        } else {
            result.push(format!("/{}{SUBTREE_SUFFIX}", prefix.join("/")));
        }
    }

    // A subtree wildcard in the combined result swallows everything else
    // it covers, except the bare root.
    let winners: Vec<String> = result
        .iter()
        .filter(|p| is_subtree(p))
        .cloned()
        .collect();
    result.retain(|p| {
        !winners
            .iter()
            .any(|w| w != p && covers_except_root(p, w))
    });

    result.sort();
    result.dedup();
    result
}

/// Longest common prefix over segment lists, full segments only.
fn common_segment_prefix(paths: &[String]) -> Vec<String> {
    let mut iter = paths.iter();
    let first = match iter.next() {
        Some(path) => segments(path),
        None => return Vec::new(),
    };
    let mut prefix_len = first.len();
    for path in iter {
        let segs = segments(path);
        let mut i = 0;
        while i < prefix_len && i < segs.len() && first[i] == segs[i] {
            i += 1;
        }
        prefix_len = i;
        if prefix_len == 0 {
            break;
        }
    }
    first[..prefix_len].iter().map(|s| s.to_string()).collect()
}
