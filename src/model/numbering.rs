//! Per-section page numbering.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::roman::to_roman;

/// Literal prefix shared by every injected page marker.
pub const PAGE_MARKER_PREFIX: &str = "[Page";

/// Style used to render a page's display number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberingScheme {
    /// Decimal numbers (1, 2, 3)
    #[default]
    Arabic,
    /// Lowercase roman numerals (i, ii, iii)
    Roman,
}

impl NumberingScheme {
    /// Scheme selected by a config `roman` flag.
    pub fn from_roman_flag(roman: bool) -> Self {
        if roman {
            NumberingScheme::Roman
        } else {
            NumberingScheme::Arabic
        }
    }

    /// Whether this is the roman scheme.
    pub fn is_roman(self) -> bool {
        self == NumberingScheme::Roman
    }
}

impl fmt::Display for NumberingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberingScheme::Arabic => f.write_str("arabic"),
            NumberingScheme::Roman => f.write_str("roman"),
        }
    }
}

/// Numbering configuration of one section.
///
/// The display number of a page is a pure function of its 0-based offset
/// within the section: `start_page + offset`, rendered in `scheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNumbering {
    scheme: NumberingScheme,
    start_page: NonZeroU32,
}

impl PageNumbering {
    /// Create a numbering starting at `start_page`.
    ///
    /// Returns `None` when `start_page` is zero.
    pub fn new(start_page: u32, scheme: NumberingScheme) -> Option<Self> {
        NonZeroU32::new(start_page).map(|start_page| Self { scheme, start_page })
    }

    /// Arabic numbering starting at `start_page`.
    pub fn arabic(start_page: NonZeroU32) -> Self {
        Self {
            scheme: NumberingScheme::Arabic,
            start_page,
        }
    }

    /// Roman numbering starting at `start_page`.
    pub fn roman(start_page: NonZeroU32) -> Self {
        Self {
            scheme: NumberingScheme::Roman,
            start_page,
        }
    }

    /// The numbering scheme.
    pub fn scheme(&self) -> NumberingScheme {
        self.scheme
    }

    /// The number shown on the first page of the section.
    pub fn start_page(&self) -> u32 {
        self.start_page.get()
    }

    /// Display string for the page at `offset` (0-based) within the section.
    pub fn page_string(&self, offset: usize) -> String {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        let absolute = self.start_page.get().saturating_add(offset);
        match self.scheme {
            NumberingScheme::Roman => to_roman(absolute),
            NumberingScheme::Arabic => absolute.to_string(),
        }
    }

    /// Marker text `[Page <n>]` for the page at `offset`.
    pub fn page_marker(&self, offset: usize) -> String {
        format!("{} {}]", PAGE_MARKER_PREFIX, self.page_string(offset))
    }
}

impl Default for PageNumbering {
    /// Arabic numbering starting at 1, used for unconfigured sections.
    fn default() -> Self {
        Self::arabic(NonZeroU32::MIN)
    }
}
