//! Table-of-contents restructuring.
//!
//! Recognition is heuristic: a line is an entry when it ends in a page number
//! preceded by a run of dots, ellipses or whitespace. Text with no such line
//! is returned unchanged.

use regex::Regex;

use crate::model::{TocEntry, TocTable};

/// Extracts `(title, page)` pairs from normalized table-of-contents text.
#[derive(Debug, Clone)]
pub struct TocExtractor {
    entry_regex: Regex,
}

impl TocExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self {
            entry_regex: Regex::new(r"(?m)^(.*?)[.…\s]+(\d+)$").expect("static regex"),
        }
    }

    /// Collect all entries in order of appearance.
    pub fn entries(&self, text: &str) -> TocTable {
        let mut table = TocTable::new();
        for caps in self.entry_regex.captures_iter(text) {
            table.push(TocEntry::new(&caps[1], &caps[2]));
        }
        table
    }

    /// Render `text` as a Markdown table, or return it unchanged when no
    /// entry is recognised.
    pub fn extract(&self, text: &str) -> String {
        let table = self.entries(text);
        if table.is_empty() {
            log::warn!("No table-of-contents entries recognised; keeping text as is");
            return text.to_string();
        }
        log::debug!("Recognised {} table-of-contents entries", table.len());
        table.to_markdown()
    }
}

impl Default for TocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_leaders() {
        let extractor = TocExtractor::new();
        let result = extractor.extract("Introduction .......... 1\nMethods .... 15\n");
        assert_eq!(
            result,
            "| Section | Page |\n|---------|------|\n| Introduction | 1 |\n| Methods | 15 |\n"
        );
    }

    #[test]
    fn test_no_matches_returns_input() {
        let extractor = TocExtractor::new();
        assert_eq!(extractor.extract("no matches here"), "no matches here");
        assert_eq!(extractor.extract(""), "");
    }

    #[test]
    fn test_ellipsis_and_space_separators() {
        let extractor = TocExtractor::new();
        let table = extractor.entries("Background… 7\nResults   42");
        assert_eq!(
            table.entries,
            vec![TocEntry::new("Background", "7"), TocEntry::new("Results", "42")]
        );
    }

    #[test]
    fn test_pipe_in_title_is_escaped() {
        let extractor = TocExtractor::new();
        let result = extractor.extract("Input | Output ..... 9");
        assert!(result.contains("| Input \\| Output | 9 |"));
    }

    #[test]
    fn test_order_of_appearance() {
        let extractor = TocExtractor::new();
        let table = extractor.entries("Zeta . 30\nAlpha . 2\nMu . 11");
        let titles: Vec<_> = table.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_lines_without_page_number_are_skipped() {
        let extractor = TocExtractor::new();
        let table = extractor.entries("Contents\nChapter One .... 3");
        assert_eq!(table.len(), 1);
        assert_eq!(table.entries[0].page, "3");
    }
}
