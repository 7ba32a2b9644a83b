//! Per-section outcomes of a pipeline run.

use serde::Serialize;

use crate::error::Result;

/// Result of processing one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionOutcome {
    /// Section written successfully
    Converted {
        /// Section id
        section: String,
        /// Where the output was written
        output: String,
        /// Number of source pages
        pages: usize,
    },

    /// Section skipped because of an error
    Failed {
        /// Section id
        section: String,
        /// Error message
        reason: String,
    },
}

impl SectionOutcome {
    /// A successful outcome.
    pub fn converted(section: impl Into<String>, output: impl Into<String>, pages: usize) -> Self {
        SectionOutcome::Converted {
            section: section.into(),
            output: output.into(),
            pages,
        }
    }

    /// A failed outcome.
    pub fn failed(section: impl Into<String>, reason: impl Into<String>) -> Self {
        SectionOutcome::Failed {
            section: section.into(),
            reason: reason.into(),
        }
    }

    /// Section id.
    pub fn section(&self) -> &str {
        match self {
            SectionOutcome::Converted { section, .. } | SectionOutcome::Failed { section, .. } => {
                section
            }
        }
    }

    /// Whether the section was written.
    pub fn is_success(&self) -> bool {
        matches!(self, SectionOutcome::Converted { .. })
    }
}

/// Outcomes of a run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// One outcome per attempted section
    pub outcomes: Vec<SectionOutcome>,
}

impl PipelineReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an outcome.
    pub fn push(&mut self, outcome: SectionOutcome) {
        self.outcomes.push(outcome);
    }

    /// Successful outcomes.
    pub fn succeeded(&self) -> impl Iterator<Item = &SectionOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    /// Failed outcomes.
    pub fn failed(&self) -> impl Iterator<Item = &SectionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// True when no section failed.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(SectionOutcome::is_success)
    }

    /// Outcome for a section, ignoring case.
    pub fn get(&self, section: &str) -> Option<&SectionOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.section().eq_ignore_ascii_case(section))
    }

    /// Number of attempted sections.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if nothing was attempted.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Serialize to JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_partitions() {
        let mut report = PipelineReport::new();
        report.push(SectionOutcome::converted("chapter_1", "out/chapter_1.txt", 3));
        report.push(SectionOutcome::failed("chapter_2", "boom"));

        assert_eq!(report.len(), 2);
        assert!(!report.is_success());
        assert_eq!(report.succeeded().count(), 1);
        assert_eq!(report.failed().next().unwrap().section(), "chapter_2");
        assert!(report.get("CHAPTER_1").unwrap().is_success());
    }

    #[test]
    fn test_report_json() {
        let mut report = PipelineReport::new();
        report.push(SectionOutcome::failed("toc", "unreadable"));
        let json = report.to_json(false).unwrap();
        assert_eq!(
            json,
            r#"{"outcomes":[{"status":"failed","section":"toc","reason":"unreadable"}]}"#
        );
    }

    #[test]
    fn test_empty_report_is_success() {
        assert!(PipelineReport::new().is_success());
    }
}
