use serde::{Deserialize, Serialize};

/// A single heading extracted from a markdown document.
///
/// Lines are 0-based. `end_line` is the last line of the heading's own
/// markup: the same line for ATX headings (`## Title`), the underline for
/// setext headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub text: String,
    pub level: usize,
    pub start_line: usize,
    pub end_line: usize,
}

impl HeadingRecord {
    pub fn new(text: impl Into<String>, level: usize, start_line: usize) -> Self {
        Self {
            text: text.into(),
            level,
            start_line,
            end_line: start_line,
        }
    }

    /// Builder-style override for multi-line heading markup.
    pub fn spanning(mut self, end_line: usize) -> Self {
        self.end_line = end_line.max(self.start_line);
        self
    }
}

/// A parsed markdown document: its source and its line-ordered headings.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub content: String,
    pub headings: Vec<HeadingRecord>,
}

impl Document {
    pub fn new(content: String, headings: Vec<HeadingRecord>) -> Self {
        Self { content, headings }
    }

    /// Number of lines in the source. An empty document still has one line.
    pub fn line_count(&self) -> usize {
        self.content.lines().count().max(1)
    }

    /// Index of the final line, the clamp target for "next" past the last heading.
    pub fn last_line(&self) -> usize {
        self.line_count() - 1
    }

    /// Last line of the section opened by the heading at `index`.
    ///
    /// A section runs until the line before the next heading of equal or
    /// shallower level, or to the end of the document.
    pub fn section_end(&self, index: usize) -> Option<usize> {
        let heading = self.headings.get(index)?;
        let end = self.headings[index + 1..]
            .iter()
            .find(|next| next.level <= heading.level)
            .map(|next| next.start_line.saturating_sub(1))
            .unwrap_or_else(|| self.last_line());
        Some(end.max(heading.end_line))
    }
}
