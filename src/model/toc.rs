//! Table-of-contents types.

use serde::{Deserialize, Serialize};

const HEADER_ROW: &str = "| Section | Page |";
const SEPARATOR_ROW: &str = "|---------|------|";

/// One `(title, page)` pair recognised in a table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Section title, trimmed
    pub title: String,

    /// Page label as printed
    pub page: String,
}

impl TocEntry {
    /// Create a new entry; the title is trimmed.
    pub fn new(title: impl AsRef<str>, page: impl Into<String>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            page: page.into(),
        }
    }

    /// Markdown row `| title | page |` with `|` in the title escaped.
    pub fn to_markdown_row(&self) -> String {
        format!("| {} | {} |", self.title.replace('|', "\\|"), self.page)
    }
}

/// Entries of a table of contents in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocTable {
    /// Entries in source order
    pub entries: Vec<TocEntry>,
}

impl TocTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry.
    pub fn push(&mut self, entry: TocEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render as a two-column Markdown table with header and separator rows.
    ///
    /// Every row, including the last, ends with a newline.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str(HEADER_ROW);
        output.push('\n');
        output.push_str(SEPARATOR_ROW);
        output.push('\n');
        for entry in &self.entries {
            output.push_str(&entry.to_markdown_row());
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_trims_title() {
        let entry = TocEntry::new("  Methods  ", "15");
        assert_eq!(entry.title, "Methods");
        assert_eq!(entry.to_markdown_row(), "| Methods | 15 |");
    }

    #[test]
    fn test_pipe_is_escaped() {
        let entry = TocEntry::new("Input | Output", "3");
        assert_eq!(entry.to_markdown_row(), "| Input \\| Output | 3 |");
    }

    #[test]
    fn test_table_rendering() {
        let mut table = TocTable::new();
        table.push(TocEntry::new("Introduction", "1"));
        table.push(TocEntry::new("Methods", "15"));

        assert_eq!(
            table.to_markdown(),
            "| Section | Page |\n|---------|------|\n| Introduction | 1 |\n| Methods | 15 |\n"
        );
    }
}
