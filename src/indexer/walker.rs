use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Finds source files by extension at any depth below a root directory
pub struct FileWalker {
    extension: String,
}

impl FileWalker {
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Walks `root` and returns matching files sorted by path.
    ///
    /// Symlinks are not followed. Any error while walking (missing root,
    /// unreadable directory) is returned rather than skipped.
    pub fn walk(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && self.is_supported(entry.path()) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    pub fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == self.extension)
    }
}
