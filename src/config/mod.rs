//! Section configuration: numbering and page bounds per section.
//!
//! A configuration maps section ids to [`SectionConfig`] entries and keeps
//! declaration order, which is also the processing order. Ids are matched
//! case-insensitively. It is built either from a YAML file or from a row of
//! tabular data (see [`row`]).
//!
//! ```
//! use thesis_text::config::SectionConfigs;
//!
//! let configs = SectionConfigs::from_yaml_str(
//!     "abstract: {start_page: 3, roman: true}\nchapter_1: {start_page: 1}\n",
//! )
//! .unwrap();
//! assert_eq!(configs.numbering("ABSTRACT").page_string(0), "iii");
//! assert_eq!(configs.numbering("unknown").page_string(0), "1");
//! ```

pub mod row;

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::model::{NumberingScheme, PageNumbering};

pub use row::{Row, RowSelector, SectionField};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "thesis_config.yaml";

fn default_start_page() -> u32 {
    1
}

/// Keys read from a section entry; anything else is ignored with a warning.
const SECTION_KEYS: [&str; 3] = ["start_page", "end_page", "roman"];

/// Configuration of a single section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// First page, 1-based. Also the number displayed on the section's first page.
    #[serde(default = "default_start_page")]
    pub start_page: u32,

    /// Last page (inclusive, 1-based) in the source document, when splitting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_page: Option<u32>,

    /// Number pages with lowercase roman numerals
    #[serde(default)]
    pub roman: bool,
}

impl SectionConfig {
    /// Create a config with arabic numbering starting at `start_page`.
    pub fn new(start_page: u32) -> Self {
        Self {
            start_page,
            end_page: None,
            roman: false,
        }
    }

    /// Set the inclusive last page.
    pub fn with_end_page(mut self, end_page: u32) -> Self {
        self.end_page = Some(end_page);
        self
    }

    /// Enable or disable roman numbering.
    pub fn with_roman(mut self, roman: bool) -> Self {
        self.roman = roman;
        self
    }

    /// Numbering derived from `start_page` and `roman`.
    pub fn numbering(&self) -> PageNumbering {
        PageNumbering::new(self.start_page, NumberingScheme::from_roman_flag(self.roman))
            .unwrap_or_default()
    }

    /// Inclusive page range in the source document, if bounded.
    pub fn page_range(&self) -> Option<RangeInclusive<u32>> {
        self.end_page.map(|end| self.start_page..=end)
    }

    /// Check the entry's invariants.
    pub fn validate(&self, section: &str) -> Result<()> {
        if self.start_page == 0 {
            return Err(Error::InvalidSection {
                section: section.to_string(),
                reason: "start_page must be at least 1".to_string(),
            });
        }
        if let Some(end) = self.end_page {
            if end < self.start_page {
                return Err(Error::InvalidSection {
                    section: section.to_string(),
                    reason: format!(
                        "end_page {} is before start_page {}",
                        end, self.start_page
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Ordered, case-insensitive map of section id to [`SectionConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionConfigs {
    sections: Vec<(String, SectionConfig)>,
}

impl SectionConfigs {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a section. A replaced section keeps its position.
    pub fn insert(&mut self, id: impl Into<String>, config: SectionConfig) {
        let id = id.into();
        match self.position(&id) {
            Some(index) => {
                log::warn!("Section '{}' configured more than once; last entry wins", id);
                self.sections[index] = (id, config);
            }
            None => self.sections.push((id, config)),
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(id))
    }

    /// Look up a section, ignoring case.
    pub fn get(&self, id: &str) -> Option<&SectionConfig> {
        self.position(id).map(|index| &self.sections[index].1)
    }

    /// Check if a section is configured.
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Numbering for a section. Unknown sections get arabic numbering from 1.
    pub fn numbering(&self, id: &str) -> PageNumbering {
        self.get(id).map(SectionConfig::numbering).unwrap_or_default()
    }

    /// Iterate sections in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SectionConfig)> {
        self.sections.iter().map(|(id, config)| (id.as_str(), config))
    }

    /// Section ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(id, _)| id.as_str())
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if no section is configured.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Check every entry's invariants.
    pub fn validate(&self) -> Result<()> {
        for (id, config) in &self.sections {
            config.validate(id)?;
        }
        Ok(())
    }

    /// Parse a YAML mapping of section id to entry.
    ///
    /// An entry with no body (`toc:`) takes all defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml)?;
        let mapping = match value {
            Value::Null => return Ok(Self::new()),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(Error::ConfigParse(
                    "top level must be a mapping of section ids".to_string(),
                ))
            }
        };

        let mut configs = Self::new();
        for (key, entry) in mapping {
            let id = key
                .as_str()
                .ok_or_else(|| Error::ConfigParse(format!("section id {:?} is not a string", key)))?
                .to_string();

            if let Value::Mapping(ref fields) = entry {
                for field in fields.keys() {
                    let name = field.as_str().unwrap_or_default();
                    if !SECTION_KEYS.contains(&name) {
                        log::warn!("Section '{}': ignoring unknown key {:?}", id, field);
                    }
                }
            }

            let config = match entry {
                Value::Null => SectionConfig::default(),
                entry => serde_yaml::from_value(entry).map_err(|e| Error::InvalidSection {
                    section: id.clone(),
                    reason: e.to_string(),
                })?,
            };
            config.validate(&id)?;
            configs.insert(id, config);
        }

        Ok(configs)
    }

    /// Load a YAML configuration file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Serialize to YAML, keeping declaration order.
    pub fn to_yaml(&self) -> Result<String> {
        let mut mapping = Mapping::new();
        for (id, config) in &self.sections {
            mapping.insert(Value::String(id.clone()), serde_yaml::to_value(config)?);
        }
        Ok(serde_yaml::to_string(&Value::Mapping(mapping))?)
    }

    /// Write YAML to `path`.
    pub fn write_yaml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Derive a configuration from a row of tabular data.
    pub fn from_row(row: &Row) -> Result<Self> {
        row::sections_from_row(row)
    }
}

impl FromIterator<(String, SectionConfig)> for SectionConfigs {
    fn from_iter<I: IntoIterator<Item = (String, SectionConfig)>>(iter: I) -> Self {
        let mut configs = Self::new();
        for (id, config) in iter {
            configs.insert(id, config);
        }
        configs
    }
}

/// Where a section configuration comes from.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Hand-written YAML file
    Yaml(PathBuf),

    /// One row of a CSV or JSON table
    Rows {
        /// Table file; `.json` is read as JSON, anything else as CSV
        path: PathBuf,
        /// Which row to use
        selector: RowSelector,
    },

    /// Already resolved configuration
    Inline(SectionConfigs),
}

impl ConfigSource {
    /// Resolve to a validated configuration.
    pub fn resolve(&self) -> Result<SectionConfigs> {
        let configs = match self {
            ConfigSource::Yaml(path) => SectionConfigs::from_yaml_file(path)?,
            ConfigSource::Rows { path, selector } => {
                let row = Row::load(path, selector)?;
                SectionConfigs::from_row(&row)?
            }
            ConfigSource::Inline(configs) => configs.clone(),
        };
        configs.validate()?;
        log::info!("Resolved configuration for {} sections", configs.len());
        Ok(configs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
abstract:
  start_page: 3
  roman: true
toc:
chapter_1:
  start_page: 1
  end_page: 20
";

    #[test]
    fn test_yaml_defaults_and_order() {
        let configs = SectionConfigs::from_yaml_str(SAMPLE).unwrap();
        let ids: Vec<_> = configs.ids().collect();
        assert_eq!(ids, vec!["abstract", "toc", "chapter_1"]);

        assert_eq!(configs.get("toc"), Some(&SectionConfig::default()));
        assert_eq!(
            configs.get("chapter_1"),
            Some(&SectionConfig::new(1).with_end_page(20))
        );
    }

    #[test]
    fn test_lookup_ignores_case() {
        let configs = SectionConfigs::from_yaml_str(SAMPLE).unwrap();
        assert!(configs.contains("Abstract"));
        assert_eq!(configs.numbering("ABSTRACT").page_string(1), "iv");
    }

    #[test]
    fn test_unknown_section_defaults() {
        let configs = SectionConfigs::new();
        let numbering = configs.numbering("appendix");
        assert_eq!(numbering, PageNumbering::default());
        assert_eq!(numbering.page_string(0), "1");
    }

    #[test]
    fn test_zero_start_page_rejected() {
        let err = SectionConfigs::from_yaml_str("chapter_1: {start_page: 0}").unwrap_err();
        assert!(matches!(err, Error::InvalidSection { ref section, .. } if section == "chapter_1"));
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err =
            SectionConfigs::from_yaml_str("chapter_1: {start_page: 9, end_page: 2}").unwrap_err();
        assert!(err.to_string().contains("chapter_1"));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let configs =
            SectionConfigs::from_yaml_str("chapter_1: {start: 4, roman: true, note: draft}")
                .unwrap();
        assert_eq!(
            configs.get("chapter_1"),
            Some(&SectionConfig::new(1).with_roman(true))
        );
    }

    #[test]
    fn test_mistyped_value_rejected() {
        let err = SectionConfigs::from_yaml_str("chapter_1: {start_page: four}").unwrap_err();
        assert!(matches!(err, Error::InvalidSection { .. }));
    }

    #[test]
    fn test_non_mapping_rejected() {
        assert!(matches!(
            SectionConfigs::from_yaml_str("- a\n- b\n"),
            Err(Error::ConfigParse(_))
        ));
        assert!(SectionConfigs::from_yaml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_insert_replaces_case_insensitively() {
        let mut configs = SectionConfigs::new();
        configs.insert("TOC", SectionConfig::new(1));
        configs.insert("chapter_1", SectionConfig::new(1));
        configs.insert("toc", SectionConfig::new(2).with_roman(true));

        assert_eq!(configs.len(), 2);
        assert_eq!(configs.ids().next(), Some("toc"));
        assert_eq!(configs.numbering("TOC").page_string(0), "ii");
    }

    #[test]
    fn test_yaml_round_trip_keeps_order() {
        let configs = SectionConfigs::from_yaml_str(SAMPLE).unwrap();
        let yaml = configs.to_yaml().unwrap();
        assert!(yaml.find("abstract").unwrap() < yaml.find("chapter_1").unwrap());
        assert_eq!(SectionConfigs::from_yaml_str(&yaml).unwrap(), configs);
    }

    #[test]
    fn test_page_range() {
        assert_eq!(SectionConfig::new(4).with_end_page(6).page_range(), Some(4..=6));
        assert_eq!(SectionConfig::new(4).page_range(), None);
    }
}
