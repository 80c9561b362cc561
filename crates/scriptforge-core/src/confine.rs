//! Path confinement against a set of workspace roots
//!
//! Every path handed back to a caller is first validated to lie inside one
//! of the configured root directories. Confinement is checked on the
//! lexically normalized path, not the canonicalized real path: a symlinked
//! root or file pointing outside the tree is accepted. Known limitation,
//! preserved deliberately.

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::types::ResolvedPath;

/// Check whether `path` is confined to one of the configured roots.
///
/// The comparison is component-wise, so a sibling directory that merely
/// shares a string prefix with a root (`/proj/Script2` against root
/// `/proj/Script`) never matches: after the root prefix the remainder must
/// be empty or start at a component boundary.
pub fn is_confined(path: &Path, roots: &[PathBuf]) -> bool {
    confining_root(&normalize(path), roots).is_some()
}

/// Resolve a candidate path to an existing file inside one of the roots.
///
/// An absolute candidate is accepted iff it is confined and exists as a
/// file; the selected root is the first confining entry in root-set order.
/// A relative candidate is joined against each root in order and the first
/// confined, existing match wins. Traversal segments that would escape a
/// root are rejected, not normalized into an escape.
///
/// Returns `None` when no root yields a match. A missing file and a file
/// outside every root are indistinguishable here by design.
pub fn resolve(candidate: &Path, roots: &[PathBuf]) -> Option<ResolvedPath> {
    if candidate.is_absolute() {
        let normalized = normalize(candidate);
        let root = confining_root(&normalized, roots)?;
        if !normalized.is_file() {
            return None;
        }
        return Some(ResolvedPath {
            absolute_path: normalized,
            root: root.to_path_buf(),
        });
    }

    for root in roots {
        let joined = normalize(&root.join(candidate));
        if !joined.starts_with(&normalize(root)) {
            debug!(
                "Candidate {} escapes root {}",
                candidate.display(),
                root.display()
            );
            continue;
        }
        if joined.is_file() {
            return Some(ResolvedPath {
                absolute_path: joined,
                root: root.clone(),
            });
        }
    }

    None
}

/// First root (in root-set order) whose components prefix `normalized`
fn confining_root<'a>(normalized: &Path, roots: &'a [PathBuf]) -> Option<&'a Path> {
    roots
        .iter()
        .map(PathBuf::as_path)
        .find(|&root| normalized.starts_with(normalize(root)))
}

/// Lexical normalization: `.` components are dropped and `..` pops the
/// previous normal component. A `..` with nothing left to pop is retained,
/// so an escaping path stays visibly outside every root instead of being
/// silently folded back in.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    _ => false,
                };
                if !popped {
                    out.push(component.as_os_str());
                }
            }
            _ => out.push(component.as_os_str()),
        }
    }
    out
}
