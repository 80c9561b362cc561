//! Bounded reading of a resolved script source

use std::path::{Path, PathBuf};

use scriptforge_core::confine;
use scriptforge_core::error::{ForgeError, ForgeResult};
use scriptforge_core::types::SourceFile;

/// Largest source file the reader will return. Scripts are text; anything
/// bigger than this is not a script.
pub const MAX_SOURCE_BYTES: u64 = 1024 * 1024;

/// Resolve `candidate` against the roots and read its content.
///
/// Resolution failure reports [`ForgeError::NotFound`] without revealing
/// whether the path was missing or merely outside the roots. Files over
/// [`MAX_SOURCE_BYTES`] are refused; content that is not valid UTF-8 is
/// reported as an IO error rather than read lossily.
pub fn read_source(candidate: &Path, roots: &[PathBuf]) -> ForgeResult<SourceFile> {
    let resolved = confine::resolve(candidate, roots)
        .ok_or_else(|| ForgeError::not_found(candidate.display().to_string()))?;

    let metadata = std::fs::metadata(&resolved.absolute_path).map_err(|e| {
        ForgeError::io(format!(
            "Failed to stat {}: {}",
            resolved.absolute_path.display(),
            e
        ))
    })?;
    if metadata.len() > MAX_SOURCE_BYTES {
        return Err(ForgeError::too_large(
            resolved.absolute_path.display().to_string(),
            metadata.len(),
        ));
    }

    let content = std::fs::read_to_string(&resolved.absolute_path).map_err(|e| {
        ForgeError::io(format!(
            "Failed to read {}: {}",
            resolved.absolute_path.display(),
            e
        ))
    })?;

    Ok(SourceFile { resolved, content })
}
