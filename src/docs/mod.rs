//! Design document handling
//!
//! This module recognizes subsection headers in LaTeX design documents and
//! rewrites the auto-generated prototype listings beneath them.

pub mod parser;
pub mod rewriter;

pub use parser::{section_title, DocParser, LineEnding, SectionHeader};
pub use rewriter::{DocumentRewriter, FilledSection, Markers, Rewrite, RewriteReport};
