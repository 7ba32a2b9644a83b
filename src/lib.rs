//! # thesis-text
//!
//! Convert a thesis PDF into per-section plain-text files annotated with
//! reconstructed page numbers.
//!
//! Each section (abstract, table of contents, chapters, ...) has its own
//! numbering: front matter is usually numbered with lowercase roman numerals,
//! chapters with arabic numbers. The pipeline normalizes the text of every
//! page, prefixes it with a `[Page n]` marker, and restructures the table of
//! contents into a Markdown table.
//!
//! ## Quick Start
//!
//! ```no_run
//! use thesis_text::convert_directory;
//!
//! fn main() -> thesis_text::Result<()> {
//!     // pdf_chapters/ holds abstract.pdf, toc.pdf, chapter_1.pdf, ...
//!     let report = convert_directory("pdf_chapters", "txt_output", "thesis_config.yaml")?;
//!     for outcome in report.failed() {
//!         eprintln!("{:?}", outcome);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Page numbering**: roman or arabic, any starting page, per section
//! - **Normalization**: whitespace, character filtering, fixed-width wrapping
//! - **TOC tables**: dot-leader lines become `| Section | Page |` rows
//! - **Splitting**: one monolithic PDF into section PDFs by page bounds
//! - **Config generation**: derive section bounds from a spreadsheet row
//! - **Isolation**: a failing section never stops the others

pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod render;
pub mod source;
pub mod split;

// Re-export commonly used types
pub use config::{ConfigSource, Row, RowSelector, SectionConfig, SectionConfigs};
pub use convert::{
    DirectorySink, MemorySink, OutputSink, PipelineOptions, PipelineReport, SectionOutcome,
    SegmentationPipeline,
};
pub use error::{Error, Result};
pub use model::{to_roman, NumberingScheme, PageNumbering, TocEntry, TocTable};
pub use render::{wrap_text, NormalizeOptions, Normalizer, TocExtractor};
pub use source::{BoundedDocument, MemorySource, PageSource, PdfDocument, SectionFiles};
pub use split::split_document;

use std::path::Path;

/// Convert a directory of per-section PDFs to text files.
///
/// Each `<section>.pdf` in `input_dir` becomes `<section>.txt` in
/// `output_dir`, numbered according to the YAML file at `config_path`.
/// Configured sections are processed first, in configuration order.
///
/// # Example
///
/// ```no_run
/// use thesis_text::convert_directory;
///
/// let report = convert_directory("pdf_chapters", "txt_output", "thesis_config.yaml").unwrap();
/// println!("{} sections converted", report.succeeded().count());
/// ```
pub fn convert_directory<P, Q, R>(input_dir: P, output_dir: Q, config_path: R) -> Result<PipelineReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let source = ConfigSource::Yaml(config_path.as_ref().to_path_buf());
    let pipeline = SegmentationPipeline::from_config_source(&source, PipelineOptions::default())?;
    convert_directory_with(&pipeline, input_dir, output_dir)
}

/// Convert a directory of per-section PDFs with a prepared pipeline.
pub fn convert_directory_with<P: AsRef<Path>, Q: AsRef<Path>>(
    pipeline: &SegmentationPipeline,
    input_dir: P,
    output_dir: Q,
) -> Result<PipelineReport> {
    let files = SectionFiles::scan(input_dir)?;
    let sections = files.ordered_ids(pipeline.configs());
    let mut sink = DirectorySink::new(output_dir.as_ref());
    Ok(pipeline.run(&sections, &files, &mut sink))
}

/// Convert the bounded sections of one monolithic PDF to text files.
///
/// Sections are located with their `start_page`/`end_page`; no intermediate
/// section PDFs are written.
///
/// # Example
///
/// ```no_run
/// use thesis_text::{convert_document, PipelineOptions, SectionConfigs};
///
/// let configs = SectionConfigs::from_yaml_file("thesis_config.yaml").unwrap();
/// let report = convert_document("thesis.pdf", configs, "txt_output", PipelineOptions::default())
///     .unwrap();
/// assert!(report.is_success());
/// ```
pub fn convert_document<P: AsRef<Path>, Q: AsRef<Path>>(
    pdf_path: P,
    configs: SectionConfigs,
    output_dir: Q,
    options: PipelineOptions,
) -> Result<PipelineReport> {
    configs.validate()?;
    let document = BoundedDocument::open(pdf_path, configs.clone())?;
    let sections = document.bounded_ids();
    let pipeline = SegmentationPipeline::with_options(configs, options);
    let mut sink = DirectorySink::new(output_dir.as_ref());
    Ok(pipeline.run(&sections, &document, &mut sink))
}

/// Split a PDF into one file per bounded section.
///
/// # Example
///
/// ```no_run
/// use thesis_text::{split_file, SectionConfigs};
///
/// let configs = SectionConfigs::from_yaml_file("thesis_config.yaml").unwrap();
/// split_file("thesis.pdf", &configs, "pdf_chapters").unwrap();
/// ```
pub fn split_file<P: AsRef<Path>, Q: AsRef<Path>>(
    pdf_path: P,
    configs: &SectionConfigs,
    output_dir: Q,
) -> Result<PipelineReport> {
    configs.validate()?;
    let document = PdfDocument::open(pdf_path)?;
    split_document(&document, configs, output_dir.as_ref())
}
