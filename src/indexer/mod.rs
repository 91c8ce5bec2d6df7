pub mod extractor;
pub mod statement;
pub mod walker;

use std::path::Path;

pub use extractor::{detect_declaration, extract_name, DeclarationExtractor};
pub use statement::{join_statement, Statement};
pub use walker::FileWalker;

use crate::error::Result;
use crate::index::DeclarationIndex;

/// Walks `root` and scans every file with the given extension
pub fn scan_directory(root: &Path, extension: &str) -> Result<DeclarationIndex> {
    let walker = FileWalker::new(extension);
    let extractor = DeclarationExtractor::new();

    let files = walker.walk(root)?;
    tracing::debug!("Found {} source files under {}", files.len(), root.display());

    let mut index = DeclarationIndex::default();
    for file in &files {
        index.push(extractor.scan_file(file)?);
    }

    for dup in index.shadowed() {
        tracing::debug!(
            "{} in {} is shadowed by an earlier declaration",
            dup.name,
            dup.source_path.display()
        );
    }

    Ok(index)
}
