//! PDF-backed page sources using lopdf.

use std::collections::BTreeMap;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use lopdf::Document as LopdfDocument;

use super::PageSource;
use crate::config::{SectionConfig, SectionConfigs};
use crate::error::{Error, Result};

/// A loaded PDF document.
pub struct PdfDocument {
    doc: LopdfDocument,
}

impl PdfDocument {
    /// Load from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc = LopdfDocument::load(path)?;
        if doc.is_encrypted() {
            log::warn!(
                "{} is encrypted; extracted text may be empty or garbled",
                path.display()
            );
        }
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Raw text of one page (1-based).
    pub fn page_text(&self, page: u32) -> Result<String> {
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::TextExtract(format!("page {}: {}", page, e)))
    }

    /// Raw text of every page in `range` (1-based, inclusive).
    pub fn range_text(&self, range: RangeInclusive<u32>) -> Result<Vec<String>> {
        let mut pages = Vec::new();
        for page in range {
            let text = self.page_text(page)?;
            if text.trim().is_empty() {
                log::warn!("Page {} has no extractable text", page);
            }
            pages.push(text);
        }
        Ok(pages)
    }

    /// Raw text of every page.
    pub fn all_text(&self) -> Result<Vec<String>> {
        match self.page_count() {
            0 => Ok(Vec::new()),
            count => self.range_text(1..=count),
        }
    }

    /// Check `config`'s bounds against the document and return them.
    pub fn checked_range(&self, section: &str, config: &SectionConfig) -> Result<RangeInclusive<u32>> {
        config.validate(section)?;
        let range = config.page_range().ok_or_else(|| Error::InvalidSection {
            section: section.to_string(),
            reason: "end_page is required to locate the section in the document".to_string(),
        })?;
        let count = self.page_count();
        if *range.end() > count {
            return Err(Error::PageOutOfRange {
                start: *range.start(),
                end: *range.end(),
                count,
            });
        }
        Ok(range)
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub fn raw_doc(&self) -> &LopdfDocument {
        &self.doc
    }
}

/// A directory of per-section PDF files; each file stem is a section id.
#[derive(Debug, Clone)]
pub struct SectionFiles {
    files: BTreeMap<String, PathBuf>,
}

impl SectionFiles {
    /// Collect every `.pdf` file (any case) directly inside `dir`.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let mut files = BTreeMap::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_pdf = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
            if !is_pdf || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                files.insert(stem.to_string(), path.clone());
            }
        }

        // Section ids are case-insensitive; keep the first spelling in sort order.
        let mut kept: BTreeMap<String, PathBuf> = BTreeMap::new();
        for (stem, path) in files {
            match kept.keys().find(|id| id.eq_ignore_ascii_case(&stem)) {
                Some(id) => log::warn!(
                    "Ignoring {}: section '{}' already provided by another file",
                    path.display(),
                    id
                ),
                None => {
                    kept.insert(stem, path);
                }
            }
        }
        Ok(Self { files: kept })
    }

    /// Section ids found, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Path of a section's file, ignoring case.
    pub fn path(&self, section: &str) -> Option<&Path> {
        self.files
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(section))
            .map(|(_, path)| path.as_path())
    }

    /// Processing order: configured sections first, in configuration order,
    /// then unconfigured files sorted by name.
    pub fn ordered_ids(&self, configs: &SectionConfigs) -> Vec<String> {
        let mut ordered = Vec::new();
        for id in configs.ids() {
            match self.files.keys().find(|file| file.eq_ignore_ascii_case(id)) {
                Some(file) => ordered.push(file.clone()),
                None => log::warn!("Section '{}' is configured but has no PDF file", id),
            }
        }
        for file in self.files.keys() {
            if !configs.contains(file) {
                ordered.push(file.clone());
            }
        }
        ordered
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if no file was found.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl PageSource for SectionFiles {
    fn section_pages(&self, section: &str) -> Result<Vec<String>> {
        let path = self
            .path(section)
            .ok_or_else(|| Error::UnknownSection(section.to_string()))?;
        PdfDocument::open(path)?.all_text()
    }
}

/// One monolithic PDF whose sections are located by page bounds.
pub struct BoundedDocument {
    document: PdfDocument,
    configs: SectionConfigs,
}

impl BoundedDocument {
    /// Pair a loaded document with its section bounds.
    pub fn new(document: PdfDocument, configs: SectionConfigs) -> Self {
        Self { document, configs }
    }

    /// Load `path` and pair it with `configs`.
    pub fn open<P: AsRef<Path>>(path: P, configs: SectionConfigs) -> Result<Self> {
        Ok(Self::new(PdfDocument::open(path)?, configs))
    }

    /// The section configuration.
    pub fn configs(&self) -> &SectionConfigs {
        &self.configs
    }

    /// Ids of sections that carry page bounds, in configuration order.
    pub fn bounded_ids(&self) -> Vec<String> {
        self.configs
            .iter()
            .filter(|(_, config)| config.end_page.is_some())
            .map(|(id, _)| id.to_string())
            .collect()
    }
}

impl PageSource for BoundedDocument {
    fn section_pages(&self, section: &str) -> Result<Vec<String>> {
        let config = self
            .configs
            .get(section)
            .ok_or_else(|| Error::UnknownSection(section.to_string()))?;
        let range = self.document.checked_range(section, config)?;
        self.document.range_text(range)
    }
}
