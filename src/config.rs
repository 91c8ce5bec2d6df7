//! Configuration for locating a tool's design document and sources.
//!
//! Settings are read from an optional `sdd-sync.toml`:
//!
//! ```toml
//! extension = "m"
//! doc_dir = "."
//! repo_root = "../../../.."
//! tools_dir = "Tools"
//!
//! [markers]
//! start = "% >> Start auto gen <<"
//! end = "% >> End auto gen <<"
//! ```
//!
//! `repo_root` is resolved relative to `doc_dir`, and a tool's sources are
//! expected under `<repo_root>/<tools_dir>/<tool>/src`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::docs::Markers;
use crate::error::{Result, SyncError};

/// Name of the config file looked up in the working directory
pub const CONFIG_FILENAME: &str = "sdd-sync.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source file extension, without the dot
    pub extension: String,
    /// Directory holding the `<tool>_sdd.tex` documents
    pub doc_dir: PathBuf,
    /// Repository root, relative to `doc_dir` unless absolute
    pub repo_root: PathBuf,
    /// Directory under the repository root containing one folder per tool
    pub tools_dir: PathBuf,
    pub markers: Markers,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: "m".to_string(),
            doc_dir: PathBuf::from("."),
            repo_root: PathBuf::from("../../../.."),
            tools_dir: PathBuf::from("Tools"),
            markers: Markers::default(),
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| SyncError::Config(format!("Invalid {}: {}", CONFIG_FILENAME, e)))
    }

    /// Loads config from `path`, or from `sdd-sync.toml` in the working directory.
    ///
    /// An explicitly given file must exist; the implicit one falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::parse(&fs::read_to_string(path)?),
            None => match fs::read_to_string(CONFIG_FILENAME) {
                Ok(content) => Self::parse(&content),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
                Err(e) => Err(e.into()),
            },
        }
    }
}

/// Where a tool's design document and source folder live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolLayout {
    pub tool_name: String,
    pub doc_path: PathBuf,
    pub src_dir: PathBuf,
}

impl ToolLayout {
    /// Document file name for a tool, e.g. `ReachCoreach_sdd.tex`
    pub fn doc_file_name(tool_name: &str) -> String {
        format!("{}_sdd.tex", tool_name)
    }

    pub fn resolve(tool_name: &str, config: &Config) -> Self {
        let src_dir = config
            .doc_dir
            .join(&config.repo_root)
            .join(&config.tools_dir)
            .join(tool_name)
            .join("src");

        Self {
            tool_name: tool_name.to_string(),
            doc_path: config.doc_dir.join(Self::doc_file_name(tool_name)),
            src_dir,
        }
    }

    pub fn with_doc_path(mut self, doc_path: Option<PathBuf>) -> Self {
        if let Some(path) = doc_path {
            self.doc_path = path;
        }
        self
    }

    pub fn with_src_dir(mut self, src_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = src_dir {
            self.src_dir = dir;
        }
        self
    }
}
