//! Documents as ordered, non-blank lines

use std::path::Path;

use crate::error::Result;

/// The searchable lines of a text file
///
/// Each line is trimmed and blank lines are dropped; the remaining lines
/// keep their relative order. Index `i` is reported as line number `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split text on newlines, trimming and discarding blank lines
    pub fn parse(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { lines }
    }

    /// Read a UTF-8 file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let document = Self::parse(&text);
        log::debug!("Read {} lines from {}", document.len(), path.display());
        Ok(document)
    }

    /// All lines, in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line at a 0-based index
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// 1-based line number for a 0-based index
    pub fn line_number(index: usize) -> usize {
        index + 1
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for Document {
    fn from(lines: Vec<String>) -> Self {
        let lines = lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();
        Self { lines }
    }
}
