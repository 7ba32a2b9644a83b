//! Core value types: page numbering and table-of-contents entries.

mod numbering;
mod roman;
mod toc;

pub use numbering::{NumberingScheme, PageNumbering, PAGE_MARKER_PREFIX};
pub use roman::to_roman;
pub use toc::{TocEntry, TocTable};
