//! Text rendering: page normalization and table-of-contents restructuring.

mod normalize;
mod toc;

pub use normalize::{wrap_text, NormalizeOptions, Normalizer, DEFAULT_LINE_WIDTH};
pub use toc::TocExtractor;
