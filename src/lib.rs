pub mod config;
pub mod docs;
pub mod error;
pub mod index;
pub mod indexer;

pub use config::{Config, ToolLayout, CONFIG_FILENAME};
pub use docs::{DocParser, DocumentRewriter, FilledSection, Markers, Rewrite, RewriteReport};
pub use error::{Result, SyncError};
pub use index::{Declaration, DeclarationIndex, DeclarationKind, ScannedFile};
pub use indexer::{scan_directory, DeclarationExtractor, FileWalker};
