//! Splices declaration listings into a LaTeX document.
//!
//! Everything between a start marker and the next end marker (both inclusive)
//! is treated as output of a previous run and dropped. After every subsection
//! header whose title names a known declaration, a fresh region is emitted:
//!
//! ```text
//! \subsection{name}
//! % >> Start auto gen <<
//! \begin{lstlisting}
//! <declaration lines>
//! <comment lines that follow it>
//! \end{lstlisting}
//! % >> End auto gen <<
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::docs::parser::{section_title, LineEnding};
use crate::error::{Result, SyncError};
use crate::index::DeclarationIndex;

/// Marker and listing lines written around generated content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markers {
    pub start: String,
    pub end: String,
    pub listing_begin: String,
    pub listing_end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: "% >> Start auto gen <<".to_string(),
            end: "% >> End auto gen <<".to_string(),
            listing_begin: "\\begin{lstlisting}".to_string(),
            listing_end: "\\end{lstlisting}".to_string(),
        }
    }
}

/// A header that received a generated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledSection {
    pub title: String,
    /// Header line in the original document (1-based)
    pub header_line: usize,
    pub source_path: PathBuf,
    /// Declaration lines copied from the source (0-based, inclusive)
    pub first_line: usize,
    pub last_line: usize,
    /// Number of comment lines copied after the declaration
    pub description_lines: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub filled: Vec<FilledSection>,
    /// Lines dropped from previously generated regions, markers included
    pub stale_lines_removed: usize,
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct Rewrite {
    pub content: String,
    pub report: RewriteReport,
}

pub struct DocumentRewriter {
    markers: Markers,
}

impl DocumentRewriter {
    pub fn new(markers: Markers) -> Self {
        Self { markers }
    }

    /// Produces the updated document without touching the filesystem.
    ///
    /// Kept lines retain their own terminators. Inserted lines use the
    /// terminator of the header they follow, or the document's dominant one
    /// when the header is the unterminated last line.
    pub fn rewrite(&self, content: &str, index: &DeclarationIndex) -> Result<Rewrite> {
        let fallback = LineEnding::detect(content).as_str();
        let mut new_content = String::with_capacity(content.len());
        let mut report = RewriteReport::default();
        let mut open_region: Option<usize> = None;

        for (i, raw) in content.split_inclusive('\n').enumerate() {
            let (line, terminator) = split_terminator(raw);

            if open_region.is_some() {
                report.stale_lines_removed += 1;
                if line.starts_with(&self.markers.end) {
                    open_region = None;
                }
                continue;
            }

            if line.starts_with(&self.markers.start) {
                report.stale_lines_removed += 1;
                open_region = Some(i + 1);
                continue;
            }

            if line.starts_with(&self.markers.end) {
                tracing::warn!("line {}: end marker without a matching start marker", i + 1);
            }

            new_content.push_str(raw);

            let Some(title) = section_title(line) else {
                continue;
            };
            let Some((file, decl)) = index.find(&title) else {
                continue;
            };

            let description = file.description_lines(decl);
            let mut region = vec![self.markers.start.as_str(), self.markers.listing_begin.as_str()];
            region.extend(file.declaration_lines(decl).iter().map(String::as_str));
            region.extend(description.iter().map(String::as_str));
            region.push(self.markers.listing_end.as_str());
            region.push(self.markers.end.as_str());

            if terminator.is_empty() {
                new_content.push_str(fallback);
                new_content.push_str(&region.join(fallback));
            } else {
                for region_line in region {
                    new_content.push_str(region_line);
                    new_content.push_str(terminator);
                }
            }

            tracing::debug!(
                "Filled {} from {}:{}",
                title,
                decl.source_path.display(),
                decl.first_line + 1
            );
            report.filled.push(FilledSection {
                title,
                header_line: i + 1,
                source_path: decl.source_path.clone(),
                first_line: decl.first_line,
                last_line: decl.last_line,
                description_lines: description.len(),
            });
        }

        if let Some(line) = open_region {
            return Err(SyncError::UnterminatedRegion { line });
        }

        report.changed = new_content != content;
        Ok(Rewrite {
            content: new_content,
            report,
        })
    }

    /// Rewrites the document at `path` in place.
    ///
    /// The new content is fully built before the file is truncated, so a failed
    /// run leaves the document untouched.
    pub fn rewrite_file(&self, path: &Path, index: &DeclarationIndex) -> Result<RewriteReport> {
        let rewrite = self.preview_file(path, index)?;
        fs::write(path, &rewrite.content)?;
        Ok(rewrite.report)
    }

    /// Reads the document at `path` and computes its rewrite
    pub fn preview_file(&self, path: &Path, index: &DeclarationIndex) -> Result<Rewrite> {
        let content = fs::read_to_string(path)?;
        self.rewrite(&content, index)
    }
}

impl Default for DocumentRewriter {
    fn default() -> Self {
        Self::new(Markers::default())
    }
}

/// Splits a line produced by `split_inclusive('\n')` into text and terminator
fn split_terminator(raw: &str) -> (&str, &str) {
    if let Some(text) = raw.strip_suffix("\r\n") {
        (text, &raw[text.len()..])
    } else if let Some(text) = raw.strip_suffix('\n') {
        (text, &raw[text.len()..])
    } else {
        (raw, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{Declaration, DeclarationKind, ScannedFile};

    fn source(path: &str, src: &str) -> ScannedFile {
        let lines: Vec<String> = src.lines().map(str::to_string).collect();
        let declarations = crate::indexer::DeclarationExtractor::new()
            .scan_lines(Path::new(path), &lines)
            .unwrap();
        ScannedFile {
            path: PathBuf::from(path),
            lines,
            declarations,
        }
    }

    fn index_of(files: Vec<ScannedFile>) -> DeclarationIndex {
        DeclarationIndex::new(files)
    }

    #[test]
    fn test_inserts_listing_after_header() {
        let index = index_of(vec![source(
            "MyClass.m",
            "classdef MyClass < handle\n% Does X\n% Does Y\nproperties\nend\n",
        )]);
        let doc = "\\section{Classes}\n\\subsection{MyClass}\nSome prose.\n";

        let rewrite = DocumentRewriter::default().rewrite(doc, &index).unwrap();

        assert_eq!(
            rewrite.content,
            "\\section{Classes}\n\\subsection{MyClass}\n% >> Start auto gen <<\n\\begin{lstlisting}\nclassdef MyClass < handle\n% Does X\n% Does Y\n\\end{lstlisting}\n% >> End auto gen <<\nSome prose.\n"
        );
        assert!(rewrite.report.changed);
        assert_eq!(rewrite.report.filled.len(), 1);
        assert_eq!(rewrite.report.filled[0].header_line, 2);
        assert_eq!(rewrite.report.filled[0].description_lines, 2);
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let index = index_of(vec![source(
            "f.m",
            "function [a, b] = split_it(x, ...\n    y)\n% Splits x\nend\n",
        )]);
        let doc = "\\subsection{split\\_it}\ntext\n";
        let rewriter = DocumentRewriter::default();

        let first = rewriter.rewrite(doc, &index).unwrap();
        let second = rewriter.rewrite(&first.content, &index).unwrap();

        assert_eq!(first.content, second.content);
        assert!(!second.report.changed);
        assert_eq!(second.report.stale_lines_removed, 7);
    }

    #[test]
    fn test_no_matching_titles_leaves_document_unchanged() {
        let index = index_of(vec![source("f.m", "function f()\nend\n")]);
        let doc = "\\section{Intro}\n\\subsection{Unrelated}\n\n  trailing spaces  \n";

        let rewrite = DocumentRewriter::default().rewrite(doc, &index).unwrap();

        assert_eq!(rewrite.content, doc);
        assert!(!rewrite.report.changed);
        assert!(rewrite.report.filled.is_empty());
    }

    #[test]
    fn test_stale_region_is_fully_replaced() {
        let index = index_of(vec![source("Foo.m", "function Foo(new_arg)\n% New body\nend\n")]);
        let doc = "\\subsection{Foo}\n% >> Start auto gen <<\n\\begin{lstlisting}\nfunction Foo(old_arg)\n% Old body\n% More old body\n\\end{lstlisting}\n% >> End auto gen <<\nAfter.\n";

        let rewrite = DocumentRewriter::default().rewrite(doc, &index).unwrap();

        assert_eq!(
            rewrite.content,
            "\\subsection{Foo}\n% >> Start auto gen <<\n\\begin{lstlisting}\nfunction Foo(new_arg)\n% New body\n\\end{lstlisting}\n% >> End auto gen <<\nAfter.\n"
        );
        assert!(!rewrite.content.contains("old"));
        assert_eq!(rewrite.report.stale_lines_removed, 7);
    }

    #[test]
    fn test_region_removed_when_declaration_disappears() {
        let index = DeclarationIndex::default();
        let doc = "\\subsection{Gone}\n% >> Start auto gen <<\nold\n% >> End auto gen <<\nKeep\n";

        let rewrite = DocumentRewriter::default().rewrite(doc, &index).unwrap();

        assert_eq!(rewrite.content, "\\subsection{Gone}\nKeep\n");
    }

    #[test]
    fn test_first_declaration_wins() {
        let index = index_of(vec![
            source("a/dup.m", "function dup()\n% from a\n"),
            source("b/dup.m", "function dup()\n% from b\n"),
        ]);
        let doc = "\\subsection{dup}\n";

        let rewrite = DocumentRewriter::default().rewrite(doc, &index).unwrap();

        assert!(rewrite.content.contains("% from a"));
        assert!(!rewrite.content.contains("% from b"));
        assert_eq!(rewrite.report.filled[0].source_path, PathBuf::from("a/dup.m"));
    }

    #[test]
    fn test_unterminated_region_is_error() {
        let doc = "\\subsection{x}\n% >> Start auto gen <<\nleft open\n";

        let err = DocumentRewriter::default()
            .rewrite(doc, &DeclarationIndex::default())
            .unwrap_err();

        assert!(matches!(err, SyncError::UnterminatedRegion { line: 2 }));
    }

    #[test]
    fn test_stray_end_marker_is_kept() {
        let doc = "a\n% >> End auto gen <<\nb";

        let rewrite = DocumentRewriter::default()
            .rewrite(doc, &DeclarationIndex::default())
            .unwrap();

        assert_eq!(rewrite.content, doc);
    }

    #[test]
    fn test_crlf_document_keeps_crlf() {
        let index = index_of(vec![source("g.m", "function g()\r\n% G\r\nend\r\n")]);
        let doc = "\\subsection{g}\r\nbody\r\n";

        let rewrite = DocumentRewriter::default().rewrite(doc, &index).unwrap();

        assert_eq!(
            rewrite.content,
            "\\subsection{g}\r\n% >> Start auto gen <<\r\n\\begin{lstlisting}\r\nfunction g()\r\n% G\r\n\\end{lstlisting}\r\n% >> End auto gen <<\r\nbody\r\n"
        );
    }

    #[test]
    fn test_mixed_line_endings_preserved_without_matches() {
        let doc = "\\section{A}\r\nprose\nmore\n";

        let rewrite = DocumentRewriter::default()
            .rewrite(doc, &DeclarationIndex::default())
            .unwrap();

        assert_eq!(rewrite.content, doc);
        assert!(!rewrite.report.changed);
    }

    #[test]
    fn test_mixed_line_endings_inserted_lines_follow_header() {
        let index = index_of(vec![source("m.m", "function m()\n% M\n")]);
        let doc = "intro\r\n\\subsection{m}\nafter\r\n";

        let rewrite = DocumentRewriter::default().rewrite(doc, &index).unwrap();

        assert_eq!(
            rewrite.content,
            "intro\r\n\\subsection{m}\n% >> Start auto gen <<\n\\begin{lstlisting}\nfunction m()\n% M\n\\end{lstlisting}\n% >> End auto gen <<\nafter\r\n"
        );

        let again = DocumentRewriter::default().rewrite(&rewrite.content, &index).unwrap();
        assert!(!again.report.changed);
    }

    #[test]
    fn test_custom_markers() {
        let markers = Markers {
            start: "%% BEGIN GENERATED".to_string(),
            end: "%% END GENERATED".to_string(),
            listing_begin: "\\begin{verbatim}".to_string(),
            listing_end: "\\end{verbatim}".to_string(),
        };
        let index = index_of(vec![source("h.m", "function h()\n")]);

        let rewrite = DocumentRewriter::new(markers)
            .rewrite("\\subsection{h}", &index)
            .unwrap();

        assert_eq!(
            rewrite.content,
            "\\subsection{h}\n%% BEGIN GENERATED\n\\begin{verbatim}\nfunction h()\n\\end{verbatim}\n%% END GENERATED"
        );
    }

    #[test]
    fn test_empty_document() {
        let rewrite = DocumentRewriter::default()
            .rewrite("", &DeclarationIndex::default())
            .unwrap();
        assert_eq!(rewrite.content, "");
        assert!(!rewrite.report.changed);
    }

    #[test]
    fn test_manual_declaration_record() {
        let file = ScannedFile {
            path: PathBuf::from("k.m"),
            lines: vec!["function k(a, ...".to_string(), "   b)".to_string(), "body".to_string()],
            declarations: vec![Declaration {
                name: "k".to_string(),
                kind: DeclarationKind::Function,
                source_path: PathBuf::from("k.m"),
                first_line: 0,
                last_line: 1,
            }],
        };

        let rewrite = DocumentRewriter::default()
            .rewrite("\\subsubsection{k}\n", &index_of(vec![file]))
            .unwrap();

        assert!(rewrite.content.contains("function k(a, ...\n   b)\n\\end{lstlisting}"));
    }
}
