//! Route manifest loading.
//!
//! The manifest is a JSON export of the application's route table: either
//! a flat array of URI templates or an array of objects carrying a `uri`
//! field (other fields are ignored). Parameter placeholders use `{name}`
//! syntax and become single-segment wildcards; a trailing `{name?}` is
//! optional and yields the path both with and without it.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::inventory::InventoryError;
use crate::pathset::WILDCARD;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestEntry {
    Uri(String),
    Route { uri: String },
}

/// Load a route manifest and expand its templates into concrete path
/// patterns.
pub fn load_manifest(path: &Path) -> Result<Vec<String>, InventoryError> {
    let content = fs::read_to_string(path).map_err(|source| InventoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(&content).map_err(|source| InventoryError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;

    let mut paths = Vec::new();
    for entry in entries {
        let uri = match entry {
            ManifestEntry::Uri(uri) => uri,
            ManifestEntry::Route { uri } => uri,
        };
        paths.extend(expand_template(&uri));
    }
    Ok(paths)
}

/// Rewrite `{param}` placeholders to wildcard segments.
///
/// A trailing optional placeholder produces two entries so the bare prefix
/// stays reachable when the parameter is omitted.
pub fn expand_template(uri: &str) -> Vec<String> {
    let trimmed = uri.trim_start_matches('/');
    if trimmed.is_empty() {
        return vec!["/".to_string()];
    }

    let mut rewritten: Vec<&str> = Vec::new();
    let mut optional_tail = false;
    let segments: Vec<&str> = trimmed.split('/').collect();
    for (i, segment) in segments.iter().enumerate() {
        if is_placeholder(segment) {
            if i + 1 == segments.len() && segment.ends_with("?}") {
                optional_tail = true;
            }
            rewritten.push(WILDCARD);
        } else {
            rewritten.push(segment);
        }
    }

    let full = format!("/{}", rewritten.join("/"));
    if optional_tail {
        let prefix = if rewritten.len() == 1 {
            "/".to_string()
        } else {
            format!("/{}", rewritten[..rewritten.len() - 1].join("/"))
        };
        vec![prefix, full]
    } else {
        vec![full]
    }
}

fn is_placeholder(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}
