use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SyncError};
use crate::index::{Declaration, DeclarationKind, ScannedFile};
use crate::indexer::statement::join_statement;

/// `function` or `classdef` followed by whitespace or a continuation
static DECLARATION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(function|classdef)(?:\s+|\.\.\.)").unwrap());

/// "function ___=___(___)", where "___=" and "(___)" are optional
static FUNCTION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*function\s+(.*=)?\s*(\w+)").unwrap());

/// "classdef (___)___<___&___", where "(___)" and "<___&___" are optional
static CLASS_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*classdef\s+(\(.*\))?\s*(\w+)").unwrap());

/// Returns the kind of declaration `line` starts, if any
pub fn detect_declaration(line: &str) -> Option<DeclarationKind> {
    DECLARATION_START
        .captures(line)
        .and_then(|caps| DeclarationKind::from_keyword(caps.get(1)?.as_str()))
}

/// Pulls the declared identifier out of a whole (joined) declaration statement
pub fn extract_name(kind: DeclarationKind, statement: &str) -> Option<String> {
    let pattern = match kind {
        DeclarationKind::Function => &*FUNCTION_NAME,
        DeclarationKind::Class => &*CLASS_NAME,
    };
    pattern
        .captures(statement)
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
}

pub struct DeclarationExtractor;

impl DeclarationExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Reads a source file and extracts every declaration in it
    pub fn scan_file(&self, path: &Path) -> Result<ScannedFile> {
        let bytes = fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let lines: Vec<String> = content.lines().map(str::to_string).collect();

        let declarations = self.scan_lines(path, &lines)?;
        tracing::debug!(
            "Scanned {}: {} declarations",
            path.display(),
            declarations.len()
        );

        Ok(ScannedFile {
            path: path.to_path_buf(),
            lines,
            declarations,
        })
    }

    /// Scans lines top to bottom for function and class declarations.
    ///
    /// Nested declarations are not tracked: after a declaration header the scan
    /// simply resumes on the following line.
    pub fn scan_lines<S: AsRef<str>>(&self, path: &Path, lines: &[S]) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let Some(kind) = detect_declaration(lines[i].as_ref()) else {
                i += 1;
                continue;
            };

            let stmt = join_statement(&lines[i..]).ok_or_else(|| SyncError::UnterminatedStatement {
                path: path.to_path_buf(),
                line: lines.len(),
            })?;

            let name = extract_name(kind, &stmt.text).ok_or_else(|| {
                SyncError::MalformedDeclaration {
                    path: path.to_path_buf(),
                    line: i + 1,
                    statement: stmt.text.clone(),
                }
            })?;

            declarations.push(Declaration {
                name,
                kind,
                source_path: path.to_path_buf(),
                first_line: i,
                last_line: i + stmt.end_idx,
            });

            i += stmt.end_idx + 1;
        }

        Ok(declarations)
    }
}

impl Default for DeclarationExtractor {
    fn default() -> Self {
        Self::new()
    }
}
