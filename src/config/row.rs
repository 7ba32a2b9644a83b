//! Deriving a section configuration from one row of tabular data.
//!
//! Each section is described by three fields sharing a prefix:
//! `<Prefix>Present`, `<Prefix>FP` (first page) and `<Prefix>LP` (last page).
//! Chapters use `Ch1`..`Ch12`; named sections use their capitalised name
//! (`Abstract`, `Acknowledgments`, `TOC`, ...).

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use super::{SectionConfig, SectionConfigs};
use crate::error::{Error, Result};

/// Number of chapter columns in a row.
pub const CHAPTER_COUNT: u32 = 12;

const FRONT_MATTER: [(&str, &str, &str); 4] = [
    ("abstract", "Abstract", "Abstract"),
    ("acknowledgments", "Acknowledgments", "Acknowledgments"),
    ("toc", "TOC", "Table of Contents"),
    ("prologue", "Prologue", "Prologue"),
];

const BACK_MATTER: [(&str, &str, &str); 4] = [
    ("epilogue", "Epilogue", "Epilogue"),
    ("references", "References", "References"),
    ("appendix", "Appendix", "Appendix"),
    ("index", "Index", "Index"),
];

/// Sections numbered with roman numerals by default.
const ROMAN_SECTIONS: [&str; 3] = ["abstract", "acknowledgments", "toc"];

const TRUTHY: [&str; 6] = ["true", "yes", "y", "1", "x", "checked"];

/// Row field layout of one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionField {
    /// Section id, e.g. `chapter_3`
    pub id: String,
    /// Field name prefix, e.g. `Ch3`
    pub prefix: String,
    /// Human-readable name used in messages, e.g. `Chapter 3`
    pub label: String,
    /// Default to roman numbering
    pub roman: bool,
}

impl SectionField {
    fn named(id: &str, prefix: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            prefix: prefix.to_string(),
            label: label.to_string(),
            roman: ROMAN_SECTIONS.contains(&id),
        }
    }

    fn chapter(n: u32) -> Self {
        Self {
            id: format!("chapter_{}", n),
            prefix: format!("Ch{}", n),
            label: format!("Chapter {}", n),
            roman: false,
        }
    }

    /// Name of the presence field.
    pub fn present_field(&self) -> String {
        format!("{}Present", self.prefix)
    }

    /// Name of the first-page field.
    pub fn first_page_field(&self) -> String {
        format!("{}FP", self.prefix)
    }

    /// Name of the last-page field.
    pub fn last_page_field(&self) -> String {
        format!("{}LP", self.prefix)
    }

    /// All known sections in document order: front matter, chapters, back matter.
    pub fn all() -> Vec<SectionField> {
        let front = FRONT_MATTER
            .iter()
            .map(|(id, prefix, label)| Self::named(id, prefix, label));
        let chapters = (1..=CHAPTER_COUNT).map(Self::chapter);
        let back = BACK_MATTER
            .iter()
            .map(|(id, prefix, label)| Self::named(id, prefix, label));
        front.chain(chapters).chain(back).collect()
    }
}

/// Selects one row out of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSelector {
    /// 0-based data row index (header excluded)
    Index(usize),
    /// First row whose `column` equals `value`
    Match { column: String, value: String },
}

impl RowSelector {
    /// Parse a `column=value` expression.
    pub fn parse_match(expr: &str) -> Result<Self> {
        let (column, value) = expr
            .split_once('=')
            .ok_or_else(|| Error::RowSource(format!("expected COLUMN=VALUE, got {:?}", expr)))?;
        Ok(RowSelector::Match {
            column: column.trim().to_string(),
            value: value.trim().to_string(),
        })
    }

    fn matches(&self, index: usize, row: &Row) -> bool {
        match self {
            RowSelector::Index(wanted) => *wanted == index,
            RowSelector::Match { column, value } => row.get(column) == Some(value.as_str()),
        }
    }
}

impl Default for RowSelector {
    fn default() -> Self {
        RowSelector::Index(0)
    }
}

/// One row of named fields. Field names are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.fields
            .insert(name.as_ref().trim().to_lowercase(), value.into());
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Read the selected row of a CSV table with a header line.
    pub fn from_csv_reader<R: Read>(reader: R, selector: &RowSelector) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row: Row = headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect();
            if selector.matches(index, &row) {
                return Ok(row);
            }
        }

        Err(Error::RowSource(format!("no row matches {:?}", selector)))
    }

    /// Parse JSON: either one object, or an array of objects to select from.
    ///
    /// Booleans and numbers are stored in their JSON text form, nulls as "".
    pub fn from_json_str(json: &str, selector: &RowSelector) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        match value {
            Value::Object(_) => Self::from_json_value(&value),
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    let row = Self::from_json_value(item)?;
                    if selector.matches(index, &row) {
                        return Ok(row);
                    }
                }
                Err(Error::RowSource(format!("no row matches {:?}", selector)))
            }
            _ => Err(Error::RowSource(
                "expected a JSON object or an array of objects".to_string(),
            )),
        }
    }

    fn from_json_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::RowSource("row is not a JSON object".to_string()))?;
        Ok(object
            .iter()
            .map(|(name, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
                (name.clone(), text)
            })
            .collect())
    }

    /// Load a row from a file; `.json` is read as JSON, anything else as CSV.
    pub fn load<P: AsRef<Path>>(path: P, selector: &RowSelector) -> Result<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            let contents = std::fs::read_to_string(path)?;
            Self::from_json_str(&contents, selector)
        } else {
            Self::from_csv_reader(File::open(path)?, selector)
        }
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY.iter().any(|t| value.eq_ignore_ascii_case(t))
}

/// Parse a page bound. Integer-valued decimals such as `"12.0"` are accepted.
fn parse_page(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Ok(page) = raw.parse::<u32>() {
        return Some(page);
    }
    let value: f64 = raw.parse().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// Build the configuration for every section the row marks present.
///
/// Fails on the first present section whose first or last page is not a
/// positive integer, or whose last page precedes its first.
pub fn sections_from_row(row: &Row) -> Result<SectionConfigs> {
    let mut configs = SectionConfigs::new();

    for field in SectionField::all() {
        let present = row.get(&field.present_field()).is_some_and(is_truthy);
        if !present {
            continue;
        }

        let first_raw = row.get(&field.first_page_field()).unwrap_or_default();
        let last_raw = row.get(&field.last_page_field()).unwrap_or_default();

        let bounds = match (parse_page(first_raw), parse_page(last_raw)) {
            (Some(first), Some(last)) if first >= 1 && last >= first => Some((first, last)),
            _ => None,
        };
        let (first, last) = bounds.ok_or_else(|| Error::InvalidPageBounds {
            section: field.id.clone(),
            label: field.label.clone(),
            first: first_raw.to_string(),
            last: last_raw.to_string(),
        })?;

        log::debug!("{}: pages {}-{} (roman: {})", field.id, first, last, field.roman);
        configs.insert(
            field.id,
            SectionConfig::new(first)
                .with_end_page(last)
                .with_roman(field.roman),
        );
    }

    Ok(configs)
}
