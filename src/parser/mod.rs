//! Markdown heading extraction.
//!
//! This module turns markdown source into a line-ordered list of
//! [`HeadingRecord`]s. All parsing is delegated to `turbovault-parser` for
//! code-block-aware OFM (Obsidian Flavored Markdown) support; this layer only
//! moves turbovault's 1-based positions onto the 0-based lines the navigator
//! works with and finds where each heading's markup ends.

mod document;

pub use document::{Document, HeadingRecord};

use std::path::Path;

/// Parse a markdown file and extract its headings.
///
/// # Arguments
///
/// * `path` - Path to the markdown file
///
/// # Returns
///
/// A `Document` containing the file content and its line-ordered headings.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn parse_file(path: &Path) -> std::io::Result<Document> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_markdown(&content))
}

/// Parse markdown content and extract headings with line positions.
///
/// Headings come back in source order, which is also ascending `start_line`
/// order; every consumer relies on that.
///
/// # Arguments
///
/// * `content` - Markdown content as a string
///
/// # Returns
///
/// A `Document` whose headings carry 0-based start and end lines.
pub fn parse_markdown(content: &str) -> Document {
    let lines: Vec<&str> = content.lines().collect();

    let headings = turbovault_parser::parse_headings(content)
        .into_iter()
        .map(|h| {
            let line = h.position.line.saturating_sub(1);
            HeadingRecord::new(h.text, (h.level as usize).clamp(1, 6), line)
                .spanning(markup_end_line(&lines, line))
        })
        .collect();

    Document::new(content.to_string(), headings)
}

/// Check whether a path looks like a markdown file by its extension.
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

/// Last line of the heading markup starting at `start`.
///
/// An ATX heading (`## Title`, also inside a block quote or list item) is a
/// single line. Otherwise the heading is setext: one or more text lines
/// closed by a run of `=` or `-`, and the underline is the last line.
fn markup_end_line(lines: &[&str], start: usize) -> usize {
    let Some(first) = lines.get(start) else {
        return start;
    };
    let first = block_text(first);
    if first.trim_end().is_empty() || is_atx_heading(first) {
        return start;
    }
    for (line, text) in lines.iter().enumerate().skip(start + 1) {
        let text = block_text(text).trim_end();
        if text.is_empty() {
            break;
        }
        if is_setext_underline(text) {
            return line;
        }
    }
    start
}

/// Line text with block quote markers and a leading list marker removed.
fn block_text(line: &str) -> &str {
    let mut text = line.trim_start();
    while let Some(rest) = text.strip_prefix('>') {
        text = rest.trim_start();
    }
    list_item_text(text).unwrap_or(text)
}

fn list_item_text(text: &str) -> Option<&str> {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    let marker = if digits > 0 {
        match text.as_bytes().get(digits) {
            Some(b'.' | b')') => digits + 1,
            _ => return None,
        }
    } else if text.starts_with(['-', '*', '+']) {
        1
    } else {
        return None;
    };
    let rest = &text[marker..];
    rest.starts_with([' ', '\t']).then(|| rest.trim_start())
}

/// `#` to `######` followed by whitespace or the end of the line.
fn is_atx_heading(text: &str) -> bool {
    let hashes = text.chars().take_while(|&c| c == '#').count();
    let rest = &text[hashes..];
    (1..=6).contains(&hashes) && (rest.is_empty() || rest.starts_with([' ', '\t']))
}

fn is_setext_underline(text: &str) -> bool {
    !text.is_empty() && (text.chars().all(|c| c == '=') || text.chars().all(|c| c == '-'))
}
