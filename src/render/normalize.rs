//! Page text normalization: whitespace collapse, character filtering,
//! punctuation tightening and fixed-width wrapping.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::PAGE_MARKER_PREFIX;

/// Default wrap width in columns.
pub const DEFAULT_LINE_WIDTH: usize = 80;

/// Options for page text normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Maximum line width when wrapping (0 = no wrap)
    pub line_width: usize,

    /// Compose Unicode to NFC before filtering
    pub normalize_unicode: bool,
}

impl NormalizeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the wrap width.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    /// Enable or disable NFC composition.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            normalize_unicode: true,
        }
    }
}

/// Cleans raw extracted page text.
///
/// Stages, in order:
/// 1. collapse every whitespace run (newlines included) to one space
/// 2. drop characters other than word characters, whitespace and `.,!?;:()-`
/// 3. remove whitespace before `.,!?;:`
/// 4. trim
/// 5. wrap to [`NormalizeOptions::line_width`]
///
/// The result is stable under a second pass.
#[derive(Debug, Clone)]
pub struct Normalizer {
    options: NormalizeOptions,
    whitespace: Regex,
    disallowed: Regex,
    space_before_punct: Regex,
}

impl Normalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            whitespace: Regex::new(r"\s+").expect("static regex"),
            disallowed: Regex::new(r"[^\w\s.,!?;:()\-]").expect("static regex"),
            space_before_punct: Regex::new(r"\s+([.,!?;:])").expect("static regex"),
        }
    }

    /// The options in effect.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize one page of raw text.
    pub fn normalize(&self, raw: &str) -> String {
        let composed: String;
        let text = if self.options.normalize_unicode {
            composed = raw.nfc().collect();
            composed.as_str()
        } else {
            raw
        };

        let text = self.whitespace.replace_all(text, " ");
        let text = self.disallowed.replace_all(&text, "");
        let text = self.space_before_punct.replace_all(&text, "$1");

        wrap_text(text.trim(), self.options.line_width)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

/// Wrap `text` to lines of at most `width` columns.
///
/// Paragraphs are split on `\n`. Blank paragraphs become empty lines and
/// paragraphs starting with `[Page` pass through untouched. Words are never
/// split, so a single word wider than `width` gets a line of its own.
/// A `width` of zero disables wrapping; each paragraph still has its words
/// joined by single spaces.
pub fn wrap_text(text: &str, width: usize) -> String {
    let width = if width == 0 { usize::MAX } else { width };

    let mut lines: Vec<String> = Vec::new();

    for paragraph in text.split('\n') {
        let stripped = paragraph.trim();
        if stripped.is_empty() {
            lines.push(String::new());
            continue;
        }

        if stripped.starts_with(PAGE_MARKER_PREFIX) {
            lines.push(paragraph.to_string());
            continue;
        }

        let mut line = String::new();
        let mut line_width: usize = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if line_width > 0 && line_width.saturating_add(1 + word_width) > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines.join("\n")
}
