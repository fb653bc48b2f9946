//! Static asset enumeration.
//!
//! Files under an asset root are served verbatim under `/`, so every file
//! becomes one exact inventory entry. Hidden files and hidden directories
//! are skipped.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::inventory::InventoryError;

/// Walk an asset root and return one URL path per file.
pub fn collect_assets(root: &Path) -> Result<Vec<String>, InventoryError> {
    if !root.is_dir() {
        return Err(InventoryError::AssetRoot {
            path: root.to_path_buf(),
        });
    }

    let mut paths = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
    for entry in walker {
        let entry = entry.map_err(|source| InventoryError::Walk {
            root: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let url = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        paths.push(format!("/{url}"));
    }
    Ok(paths)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_files_become_url_paths() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join("css/app.css"));
        touch(&root.path().join("js/app.js"));
        touch(&root.path().join("favicon.ico"));

        let mut paths = collect_assets(root.path()).unwrap();
        paths.sort();
        assert_eq!(paths, vec!["/css/app.css", "/favicon.ico", "/js/app.js"]);
    }

    #[test]
    fn test_hidden_entries_are_skipped() {
        let root = tempfile::tempdir().unwrap();
        touch(&root.path().join(".htaccess"));
        touch(&root.path().join(".well-known/keys.txt"));
        touch(&root.path().join("img/logo.png"));

        let paths = collect_assets(root.path()).unwrap();
        assert_eq!(paths, vec!["/img/logo.png"]);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("nope");
        let err = collect_assets(&missing).unwrap_err();
        assert!(matches!(err, InventoryError::AssetRoot { .. }));
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let root = tempfile::tempdir().unwrap();
        let paths = collect_assets(root.path()).unwrap();
        assert!(paths.is_empty());
    }
}
