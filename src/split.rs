//! Splitting one PDF into per-section PDF files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{SectionConfig, SectionConfigs};
use crate::convert::{PipelineReport, SectionOutcome};
use crate::error::Result;
use crate::source::PdfDocument;

/// Default directory for split section PDFs.
pub const DEFAULT_SPLIT_DIR: &str = "pdf_chapters";

/// Output path of a section's PDF inside `out_dir`.
pub fn section_pdf_path(out_dir: &Path, section: &str) -> PathBuf {
    out_dir.join(format!("{}.pdf", section))
}

/// Write `<section>.pdf` into `out_dir` for every section with page bounds.
///
/// Bounds are 1-based and inclusive. A section whose bounds do not fit the
/// document, or whose file cannot be written, is reported as failed without
/// affecting the others. Sections without `end_page` are skipped.
pub fn split_document(
    document: &PdfDocument,
    configs: &SectionConfigs,
    out_dir: &Path,
) -> Result<PipelineReport> {
    fs::create_dir_all(out_dir)?;
    let mut report = PipelineReport::new();

    for (section, config) in configs.iter() {
        if config.end_page.is_none() {
            log::warn!("Section '{}' has no end_page; not split", section);
            continue;
        }

        let outcome = match split_section(document, section, config, out_dir) {
            Ok((path, pages)) => {
                log::info!("Wrote {} ({} pages)", path.display(), pages);
                SectionOutcome::converted(section, path.display().to_string(), pages)
            }
            Err(e) => {
                log::error!("Failed to split section '{}': {}", section, e);
                SectionOutcome::failed(section, e.to_string())
            }
        };
        report.push(outcome);
    }

    Ok(report)
}

fn split_section(
    document: &PdfDocument,
    section: &str,
    config: &SectionConfig,
    out_dir: &Path,
) -> Result<(PathBuf, usize)> {
    let range = document.checked_range(section, config)?;

    let mut doc = document.raw_doc().clone();
    let outside: Vec<u32> = doc
        .get_pages()
        .keys()
        .copied()
        .filter(|page| !range.contains(page))
        .collect();
    doc.delete_pages(&outside);
    doc.prune_objects();
    doc.renumber_objects();
    doc.compress();

    let path = section_pdf_path(out_dir, section);
    doc.save(&path)?;
    Ok((path, range.count()))
}
