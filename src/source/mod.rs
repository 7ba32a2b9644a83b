//! Page text sources.
//!
//! A [`PageSource`] hands out the raw extracted text of every physical page of
//! a section. Sources isolate the PDF library from the segmentation logic, so
//! the pipeline can run on pre-extracted text as well as on PDF files.

mod pdf;

pub use pdf::{BoundedDocument, PdfDocument, SectionFiles};

use std::collections::HashMap;

use crate::error::{Error, Result};

/// Provider of raw per-page text for a section.
///
/// Implementations must be shareable across threads so sections can be
/// rendered in parallel.
pub trait PageSource: Sync {
    /// Raw text of each page of `section`, in page order.
    ///
    /// Pages whose text cannot be recovered may be returned as empty strings.
    fn section_pages(&self, section: &str) -> Result<Vec<String>>;
}

/// In-memory source of already extracted page text.
///
/// Section ids are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sections: HashMap<String, Vec<String>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the pages of a section.
    pub fn insert<S: Into<String>>(&mut self, section: &str, pages: impl IntoIterator<Item = S>) {
        self.sections.insert(
            section.to_lowercase(),
            pages.into_iter().map(Into::into).collect(),
        );
    }

    /// Builder-style [`MemorySource::insert`].
    pub fn with_section<S: Into<String>>(
        mut self,
        section: &str,
        pages: impl IntoIterator<Item = S>,
    ) -> Self {
        self.insert(section, pages);
        self
    }

    /// Check if a section is present.
    pub fn contains(&self, section: &str) -> bool {
        self.sections.contains_key(&section.to_lowercase())
    }
}

impl PageSource for MemorySource {
    fn section_pages(&self, section: &str) -> Result<Vec<String>> {
        self.sections
            .get(&section.to_lowercase())
            .cloned()
            .ok_or_else(|| Error::UnknownSection(section.to_string()))
    }
}
