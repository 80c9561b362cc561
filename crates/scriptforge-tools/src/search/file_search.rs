//! Single file search logic

use tracing::warn;

use scriptforge_core::types::{ContextLine, ScriptFile, SearchMatch};

use super::Search;

impl Search {
    /// Search one file, returning matches in line order.
    ///
    /// Matching is line-granular: a line containing several match positions
    /// produces exactly one [`SearchMatch`], since downstream counting
    /// assumes one entry per matching line. The context window is clamped at file
    /// start and end rather than wrapping.
    pub fn file(&self, file: &ScriptFile) -> Vec<SearchMatch> {
        let content = match std::fs::read_to_string(&file.absolute_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Skipping unreadable file {}: {}",
                    file.absolute_path.display(),
                    e
                );
                return Vec::new();
            }
        };

        let lines: Vec<&str> = content.lines().collect();
        let mut matches = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if !self.regex.is_match(line) {
                continue;
            }

            let start = i.saturating_sub(self.context_radius);
            let end = std::cmp::min(i + self.context_radius + 1, lines.len());
            let context = lines[start..end]
                .iter()
                .enumerate()
                .map(|(offset, content)| ContextLine {
                    line_number: start + offset + 1,
                    content: (*content).to_string(),
                })
                .collect();

            matches.push(SearchMatch {
                line_number: i + 1,
                line: (*line).to_string(),
                context,
            });
        }

        matches
    }
}
