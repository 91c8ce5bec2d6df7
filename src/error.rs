use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("{}:{line}: file ends before completing the MATLAB statement", .path.display())]
    UnterminatedStatement { path: PathBuf, line: usize },

    #[error("{}:{line}: cannot extract a name from declaration `{statement}`", .path.display())]
    MalformedDeclaration {
        path: PathBuf,
        line: usize,
        statement: String,
    },

    #[error("line {line}: auto-generated region is never closed")]
    UnterminatedRegion { line: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{} is out of date", .0.display())]
    OutOfDate(PathBuf),
}

pub type Result<T> = std::result::Result<T, SyncError>;
