use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Function,
    Class,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Function => "function",
            DeclarationKind::Class => "class",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "function" => Some(DeclarationKind::Function),
            "classdef" => Some(DeclarationKind::Class),
            _ => None,
        }
    }
}

/// A function or class declaration found in a source file.
///
/// Line indices are 0-based and inclusive: `first_line == last_line` unless the
/// declaration is continued over several physical lines with `...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclarationKind,
    pub source_path: PathBuf,
    pub first_line: usize,
    pub last_line: usize,
}

/// A source file held in memory together with the declarations it contains
#[derive(Debug, Clone, Default)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub lines: Vec<String>,
    pub declarations: Vec<Declaration>,
}

impl ScannedFile {
    /// Physical lines of the declaration header, first..=last.
    pub fn declaration_lines(&self, decl: &Declaration) -> &[String] {
        let end = (decl.last_line + 1).min(self.lines.len());
        let start = decl.first_line.min(end);
        &self.lines[start..end]
    }

    /// Comment lines directly following the declaration header.
    ///
    /// Stops at the first line whose left-trimmed text does not start with `%`,
    /// or at end of file.
    pub fn description_lines(&self, decl: &Declaration) -> &[String] {
        let start = (decl.last_line + 1).min(self.lines.len());
        let len = self.lines[start..]
            .iter()
            .take_while(|line| line.trim_start().starts_with('%'))
            .count();
        &self.lines[start..start + len]
    }
}
