//! LaTeX design document parser
//!
//! Recognizes `\subsection{...}` style headers (any prefix, so `\subsubsection`
//! matches too) and the line ending convention of a document.

use once_cell::sync::Lazy;
use regex::Regex;

static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*subsection\{(.*)\}").unwrap());

/// A subsection header in a LaTeX document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    /// Title with `\_` unescaped to `_`
    pub title: String,
    /// Line number (1-based)
    pub line: usize,
}

/// Line terminator used when writing a document back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn detect(content: &str) -> Self {
        if content.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Returns the normalized title if `line` is a subsection header
pub fn section_title(line: &str) -> Option<String> {
    SECTION_HEADER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace("\\_", "_"))
}

pub struct DocParser;

impl DocParser {
    /// All subsection headers in document order
    pub fn headers(content: &str) -> Vec<SectionHeader> {
        content
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                section_title(line).map(|title| SectionHeader { title, line: i + 1 })
            })
            .collect()
    }
}
