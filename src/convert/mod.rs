//! Section segmentation pipeline.
//!
//! The pipeline turns the raw page text of each section into the section's
//! final document: every page is normalized and prefixed with a page marker
//! carrying its reconstructed number. The table-of-contents section is the
//! exception; its pages are joined without markers and restructured into a
//! Markdown table.
//!
//! Sources and sinks are traits, so the pipeline runs without real files:
//!
//! ```
//! use thesis_text::config::SectionConfigs;
//! use thesis_text::convert::{MemorySink, SegmentationPipeline};
//! use thesis_text::source::MemorySource;
//!
//! let configs = SectionConfigs::from_yaml_str("abstract: {start_page: 2, roman: true}").unwrap();
//! let source = MemorySource::new().with_section("abstract", ["This thesis studies...", "More."]);
//! let mut sink = MemorySink::new();
//!
//! let pipeline = SegmentationPipeline::new(configs);
//! let report = pipeline.run(&["abstract"], &source, &mut sink);
//!
//! assert!(report.is_success());
//! let text = sink.get("abstract").unwrap();
//! assert!(text.contains("[Page ii]"));
//! assert!(text.contains("[Page iii]"));
//! ```

mod report;
mod sink;

pub use report::{PipelineReport, SectionOutcome};
pub use sink::{DirectorySink, MemorySink, OutputSink, DEFAULT_OUTPUT_DIR};

use rayon::prelude::*;

use crate::config::{ConfigSource, SectionConfigs};
use crate::error::Result;
use crate::render::{NormalizeOptions, Normalizer, TocExtractor};
use crate::source::PageSource;

/// Section id that receives table-of-contents treatment by default.
pub const DEFAULT_TOC_SECTION: &str = "toc";

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Page text normalization
    pub normalize: NormalizeOptions,

    /// Render sections concurrently (output is still written in order)
    pub parallel: bool,

    /// Section id restructured as a table of contents (case-insensitive)
    pub toc_section: String,
}

impl PipelineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set normalization options.
    pub fn with_normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }

    /// Set the wrap width.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.normalize.line_width = width;
        self
    }

    /// Enable or disable parallel rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the table-of-contents section id.
    pub fn with_toc_section(mut self, section: impl Into<String>) -> Self {
        self.toc_section = section.into();
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            parallel: false,
            toc_section: DEFAULT_TOC_SECTION.to_string(),
        }
    }
}

/// Converts sections of raw page text into page-annotated documents.
pub struct SegmentationPipeline {
    configs: SectionConfigs,
    options: PipelineOptions,
    normalizer: Normalizer,
    toc: TocExtractor,
}

impl SegmentationPipeline {
    /// Create a pipeline with default options.
    pub fn new(configs: SectionConfigs) -> Self {
        Self::with_options(configs, PipelineOptions::default())
    }

    /// Create a pipeline with custom options.
    pub fn with_options(configs: SectionConfigs, options: PipelineOptions) -> Self {
        Self {
            configs,
            normalizer: Normalizer::new(options.normalize.clone()),
            toc: TocExtractor::new(),
            options,
        }
    }

    /// Resolve `source` and build a pipeline from it.
    ///
    /// Configuration errors surface here, before any section is read.
    pub fn from_config_source(source: &ConfigSource, options: PipelineOptions) -> Result<Self> {
        Ok(Self::with_options(source.resolve()?, options))
    }

    /// The section configuration.
    pub fn configs(&self) -> &SectionConfigs {
        &self.configs
    }

    /// The options in effect.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Whether `section` is the table of contents.
    pub fn is_toc(&self, section: &str) -> bool {
        section.eq_ignore_ascii_case(&self.options.toc_section)
    }

    /// Assemble a section's final text from its raw pages.
    pub fn render_pages<S: AsRef<str>>(&self, section: &str, pages: &[S]) -> String {
        let is_toc = self.is_toc(section);
        let numbering = self.configs.numbering(section);

        let mut parts = Vec::with_capacity(pages.len());
        for (index, raw) in pages.iter().enumerate() {
            let cleaned = self.normalizer.normalize(raw.as_ref());
            log::debug!("{}: page {} normalized to {} bytes", section, index + 1, cleaned.len());

            if is_toc {
                parts.push(cleaned);
            } else {
                parts.push(format!("\n{}\n{}", numbering.page_marker(index), cleaned));
            }
        }

        let text = parts.join("\n");
        if is_toc {
            self.toc.extract(&text)
        } else {
            text
        }
    }

    /// Read and render one section. Returns the text and the page count.
    pub fn render_section(&self, section: &str, source: &dyn PageSource) -> Result<(String, usize)> {
        let pages = source.section_pages(section)?;
        Ok((self.render_pages(section, &pages), pages.len()))
    }

    /// Process `sections` in order, writing each to `sink`.
    ///
    /// A section that fails to read or write is recorded as failed and the
    /// run continues with the next one.
    pub fn run<S>(
        &self,
        sections: &[S],
        source: &dyn PageSource,
        sink: &mut dyn OutputSink,
    ) -> PipelineReport
    where
        S: AsRef<str> + Sync,
    {
        self.run_with(sections, source, sink, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_section` after each section.
    pub fn run_with<S, F>(
        &self,
        sections: &[S],
        source: &dyn PageSource,
        sink: &mut dyn OutputSink,
        mut on_section: F,
    ) -> PipelineReport
    where
        S: AsRef<str> + Sync,
        F: FnMut(&SectionOutcome),
    {
        let mut report = PipelineReport::new();

        if self.options.parallel {
            let rendered: Vec<_> = sections
                .par_iter()
                .map(|section| self.render_section(section.as_ref(), source))
                .collect();
            for (section, result) in sections.iter().zip(rendered) {
                let outcome = self.finish(section.as_ref(), result, sink);
                on_section(&outcome);
                report.push(outcome);
            }
        } else {
            for section in sections {
                let section = section.as_ref();
                let result = self.render_section(section, source);
                let outcome = self.finish(section, result, sink);
                on_section(&outcome);
                report.push(outcome);
            }
        }

        report
    }

    fn finish(
        &self,
        section: &str,
        rendered: Result<(String, usize)>,
        sink: &mut dyn OutputSink,
    ) -> SectionOutcome {
        let written = rendered.and_then(|(text, pages)| {
            sink.write_section(section, &text)
                .map(|location| (location, pages))
        });

        match written {
            Ok((location, pages)) => {
                log::info!("Converted {} ({} pages) to {}", section, pages, location);
                SectionOutcome::converted(section, location, pages)
            }
            Err(e) => {
                log::error!("Error processing section '{}': {}", section, e);
                SectionOutcome::failed(section, e.to_string())
            }
        }
    }
}
