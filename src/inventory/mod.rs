//! Inventory assembly.
//!
//! # Data Flow
//! ```text
//! [inventory] config section
//!     → routes.rs (JSON manifest, {param} → *)
//!     → assets.rs (walk asset roots, one entry per file)
//!     → extra_paths (verbatim from config)
//!     → ignore_patterns filter (same wildcard grammar as the path set)
//!     → raw path list, handed to the compactor
//! ```
//!
//! # Design Decisions
//! - Sources are additive; an empty config section yields an empty
//!   inventory and the compactor rejects that downstream
//! - Ignore patterns run before compaction so a dropped path can never
//!   influence grouping
//! - No deduplication here; the optimizer owns that

pub mod assets;
pub mod routes;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::InventoryConfig;
use crate::pathset::{covers, normalize};

/// Errors that can occur while assembling the inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed route manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("asset root {path} is not a directory")]
    AssetRoot { path: PathBuf },

    #[error("failed to walk asset root {root}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Gather every configured source into one raw path list.
pub fn collect(config: &InventoryConfig) -> Result<Vec<String>, InventoryError> {
    let mut paths = Vec::new();

    let mut route_count = 0;
    if let Some(manifest) = &config.routes_manifest {
        let routes = routes::load_manifest(manifest)?;
        route_count = routes.len();
        paths.extend(routes);
    }

    let mut asset_count = 0;
    for root in &config.asset_roots {
        let assets = assets::collect_assets(root)?;
        asset_count += assets.len();
        paths.extend(assets);
    }

    paths.extend(config.extra_paths.iter().cloned());

    let before = paths.len();
    let paths = apply_ignores(paths, &config.ignore_patterns);

    tracing::info!(
        routes = route_count,
        assets = asset_count,
        extra = config.extra_paths.len(),
        ignored = before - paths.len(),
        total = paths.len(),
        "Inventory collected"
    );
    Ok(paths)
}

fn apply_ignores(paths: Vec<String>, patterns: &[String]) -> Vec<String> {
    if patterns.is_empty() {
        return paths;
    }
    let patterns: Vec<String> = patterns.iter().map(|p| normalize(p)).collect();
    paths
        .into_iter()
        .filter(|path| {
            let candidate = normalize(path);
            let ignored = patterns.iter().any(|pattern| covers(&candidate, pattern));
            if ignored {
                tracing::debug!(path = %candidate, "Dropping ignored inventory path");
            }
            !ignored
        })
        .collect()
}
