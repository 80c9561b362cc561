//! Shared data model for scriptforge operations
//!
//! Every type here crosses the boundary to the external dispatch layer, so
//! all of them are serde-serializable. They are plain values: created fresh
//! per call, never cached, never mutated after construction.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One discovered script file.
///
/// Invariant: `absolute_path` equals `root` or starts with `root` followed by
/// a path separator. `relative_path` always uses forward slashes, independent
/// of platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFile {
    /// Absolute path, confined to exactly one workspace root
    pub absolute_path: PathBuf,
    /// Path relative to the root it was found under, `/`-separated
    pub relative_path: String,
    /// The root set entry this file was found under
    pub root: PathBuf,
    /// Size in bytes, as observed at scan time
    pub size: u64,
}

/// Output of path resolution: an existing file together with the root that
/// confines it. Ephemeral, produced per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPath {
    pub absolute_path: PathBuf,
    pub root: PathBuf,
}

/// One line of context surrounding a search match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextLine {
    /// 1-based line number
    pub line_number: usize,
    pub content: String,
}

/// One search match, at line granularity: a line that matches the pattern
/// several times still produces exactly one `SearchMatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// 1-based line number of the matching line
    pub line_number: usize,
    /// Raw content of the matching line
    pub line: String,
    /// Lines spanning `[match - N, match + N]`, clamped to file bounds,
    /// including the match line itself at its correct position
    pub context: Vec<ContextLine>,
}

/// All matches found in a single file, in line order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMatches {
    pub file: ScriptFile,
    pub matches: Vec<SearchMatch>,
}

/// Outcome of one commandlet invocation.
///
/// Produced exactly once per run, after the process lifecycle has reached a
/// terminal state. Every failure mode of the runner resolves to one of these;
/// a non-zero `exit_code` is a successful result from the runner's point of
/// view, and interpreting it is the caller's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandletResult {
    /// Process exit code, or [`CommandletResult::EXIT_UNKNOWN`] when no code
    /// exists (spawn failure, killed by signal)
    pub exit_code: i32,
    /// Captured stdout, possibly ending in the truncation marker
    pub stdout: String,
    /// Captured stderr, possibly ending in the truncation marker; on spawn
    /// failure this carries the spawn error description
    pub stderr: String,
    /// True when stdout hit the capture ceiling and data was dropped
    pub stdout_truncated: bool,
    /// True when stderr hit the capture ceiling and data was dropped
    pub stderr_truncated: bool,
    /// True when the process was forcibly terminated at the deadline
    pub timed_out: bool,
}

impl CommandletResult {
    /// Sentinel exit code used when the real status cannot be determined.
    /// Must never be interpreted as success.
    pub const EXIT_UNKNOWN: i32 = -1;
}

/// Output of the bounded source-read operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Where the content was read from, including the root that served it
    pub resolved: ResolvedPath,
    pub content: String,
}
