//! Destinations for rendered section text.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Default directory for text output.
pub const DEFAULT_OUTPUT_DIR: &str = "txt_output";

/// Receives the final text of each section.
pub trait OutputSink {
    /// Store `text` for `section` and return where it went.
    fn write_section(&mut self, section: &str, text: &str) -> Result<String>;
}

/// Writes `<section>.txt` files into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create a sink writing into `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Output path for a section.
    pub fn path_for(&self, section: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", section))
    }
}

impl OutputSink for DirectorySink {
    fn write_section(&mut self, section: &str, text: &str) -> Result<String> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(section);
        fs::write(&path, text)?;
        Ok(path.display().to_string())
    }
}

/// Keeps section text in memory, in write order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    outputs: Vec<(String, String)>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text written for a section.
    pub fn get(&self, section: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|(id, _)| id == section)
            .map(|(_, text)| text.as_str())
    }

    /// Section ids in write order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|(id, _)| id.as_str())
    }

    /// Number of sections written.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Check if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl OutputSink for MemorySink {
    fn write_section(&mut self, section: &str, text: &str) -> Result<String> {
        self.outputs.push((section.to_string(), text.to_string()));
        Ok(format!("memory:{}", section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("nested"));

        let location = sink.write_section("Chapter_1", "hello").unwrap();
        let expected = dir.path().join("nested").join("Chapter_1.txt");
        assert_eq!(location, expected.display().to_string());
        assert_eq!(fs::read_to_string(expected).unwrap(), "hello");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.write_section("a", "1").unwrap();
        sink.write_section("b", "2").unwrap();
        assert_eq!(sink.get("b"), Some("2"));
        assert_eq!(sink.sections().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
