//! Recursive script discovery over a set of workspace roots

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use scriptforge_core::types::ScriptFile;

/// Extension of workspace script sources, without the leading dot
pub const SCRIPT_EXTENSION: &str = "as";

/// Directory names that are pruned entirely, never descended into: version
/// control metadata, dependency caches, IDE state, and the host
/// application's build artifacts. Fixed at compile time.
static SKIP_DIRS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        ".git",
        ".svn",
        ".vs",
        ".vscode",
        ".idea",
        "node_modules",
        "Binaries",
        "Intermediate",
        "Saved",
        "DerivedDataCache",
    ]
    .into_iter()
    .collect()
});

/// Scan the roots, in order, for script files.
///
/// Roots that do not exist or are not directories are skipped silently;
/// workspaces commonly configure optional roots. Entries that cannot be
/// read are logged and skipped without aborting siblings or other roots.
///
/// The returned inventory is sorted by `relative_path` with a locale-naive,
/// code-point comparator, independent of filesystem enumeration order. Two
/// files with the same relative path under different roots both appear,
/// ordered by root-set position.
pub fn scan(roots: &[PathBuf]) -> Vec<ScriptFile> {
    let mut found: Vec<(usize, ScriptFile)> = Vec::new();

    for (root_index, root) in roots.iter().enumerate() {
        if !root.is_dir() {
            debug!("Skipping missing script root: {}", root.display());
            continue;
        }
        scan_root(root_index, root, &mut found);
    }

    found.sort_by(|(a_index, a), (b_index, b)| {
        a.relative_path
            .cmp(&b.relative_path)
            .then(a_index.cmp(b_index))
    });

    found.into_iter().map(|(_, file)| file).collect()
}

fn scan_root(root_index: usize, root: &Path, found: &mut Vec<(usize, ScriptFile)>) {
    let walker = WalkDir::new(root).follow_links(false).into_iter();

    for entry in walker.filter_entry(|e| !is_skipped_dir(e)) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(SCRIPT_EXTENSION) {
            continue;
        }

        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        };

        found.push((
            root_index,
            ScriptFile {
                absolute_path: entry.path().to_path_buf(),
                relative_path: relative_to_root(entry.path(), root),
                root: root.to_path_buf(),
                size,
            },
        ));
    }
}

/// A root whose own name matches the skip-set is still scanned; pruning
/// applies below the root only.
fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(name))
}

/// Root-relative path with `/` separators on every platform
fn relative_to_root(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
