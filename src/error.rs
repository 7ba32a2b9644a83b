//! Error types for thesis-text.

use std::io;
use thiserror::Error;

/// Result type alias for thesis-text operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while configuring or running the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// The section configuration file could not be parsed.
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    /// A section entry is structurally invalid.
    #[error("Invalid configuration for section '{section}': {reason}")]
    InvalidSection { section: String, reason: String },

    /// A section marked present carries non-integer page bounds.
    #[error(
        "Invalid page bounds for {label} ({section}): first page {first:?}, last page {last:?}"
    )]
    InvalidPageBounds {
        section: String,
        label: String,
        first: String,
        last: String,
    },

    /// The tabular row source could not be read.
    #[error("Row source error: {0}")]
    RowSource(String),

    /// JSON could not be parsed or produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Page range falls outside the document.
    #[error("Pages {start}-{end} are out of range (document has {count} pages)")]
    PageOutOfRange { start: u32, end: u32, count: u32 },

    /// No source pages exist for the requested section.
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::RowSource(err.to_string())
    }
}
