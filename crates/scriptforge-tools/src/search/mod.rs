//! Regex search over a script inventory with bounded context windows

mod file_search;


use regex::{Regex, RegexBuilder};

use scriptforge_core::error::{ForgeError, ForgeResult};
use scriptforge_core::types::{FileMatches, ScriptFile};

/// A search request: pattern plus presentation options
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pattern: String,
    context_radius: usize,
    case_insensitive: bool,
}

impl SearchQuery {
    /// Create a query with no context lines, case-sensitive
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            context_radius: 0,
            case_insensitive: false,
        }
    }

    /// Lines of context to include before and after each match
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    /// Match without regard to letter case
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }
}

/// A compiled search, ready to run against files.
///
/// Compilation fails fast: a malformed pattern is reported before any file
/// I/O happens.
pub struct Search {
    regex: Regex,
    context_radius: usize,
}

impl Search {
    pub fn new(query: &SearchQuery) -> ForgeResult<Self> {
        let regex = RegexBuilder::new(&query.pattern)
            .case_insensitive(query.case_insensitive)
            .build()
            .map_err(|e| ForgeError::invalid_pattern(e.to_string()))?;

        Ok(Self {
            regex,
            context_radius: query.context_radius,
        })
    }

    /// Search the inventory in the order given, grouping matches per file.
    ///
    /// Files without matches produce no entry. A file that cannot be read
    /// contributes zero matches and never aborts the rest of the search.
    /// There is no built-in cap on total matches; callers that want one
    /// iterate [`Search::file`] themselves and stop when it is reached.
    pub fn run(&self, files: &[ScriptFile]) -> Vec<FileMatches> {
        let mut results = Vec::new();

        for file in files {
            let matches = self.file(file);
            if !matches.is_empty() {
                results.push(FileMatches {
                    file: file.clone(),
                    matches,
                });
            }
        }

        results
    }
}

/// Compile and run a query over an inventory in one call
pub fn search(files: &[ScriptFile], query: &SearchQuery) -> ForgeResult<Vec<FileMatches>> {
    Ok(Search::new(query)?.run(files))
}
