use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{Config, ToolLayout};
use crate::docs::{DocParser, DocumentRewriter};
use crate::error::{Result, SyncError};
use crate::indexer::scan_directory;
use sdd_sync::{DeclarationKind, RewriteReport};

#[derive(Parser)]
#[command(name = "sdd-sync")]
#[command(about = "Sync MATLAB function/class prototypes into LaTeX design documents")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Update ReachCoreach_sdd.tex from Tools/ReachCoreach/src
    sdd-sync sync ReachCoreach

    # Show what would be written without touching the document
    sdd-sync sync ReachCoreach --dry-run

    # Fail if the document is out of date (for CI)
    sdd-sync sync ReachCoreach --check

    # List declarations and whether the document has a section for them
    sdd-sync scan AutoLayout --format json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the config file (defaults to ./sdd-sync.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Options locating the document and sources of a tool
#[derive(clap::Args)]
pub struct ToolArgs {
    /// Tool name, e.g. ReachCoreach
    pub tool: String,

    /// Directory containing <TOOL>_sdd.tex
    #[arg(long)]
    pub doc_dir: Option<PathBuf>,

    /// Explicit path to the design document
    #[arg(long)]
    pub doc: Option<PathBuf>,

    /// Explicit path to the tool's source directory
    #[arg(long)]
    pub src_dir: Option<PathBuf>,
}

impl ToolArgs {
    pub fn layout(&self, config: &Config) -> ToolLayout {
        let mut config = config.clone();
        if let Some(ref doc_dir) = self.doc_dir {
            config.doc_dir = doc_dir.clone();
        }
        ToolLayout::resolve(&self.tool, &config)
            .with_doc_path(self.doc.clone())
            .with_src_dir(self.src_dir.clone())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rewrite the tool's design document with current prototypes
    Sync {
        #[command(flatten)]
        tool: ToolArgs,

        /// Print the updated document instead of writing it
        #[arg(long, conflicts_with = "check")]
        dry_run: bool,

        /// Exit with an error if the document is out of date
        #[arg(long)]
        check: bool,
    },

    /// List declarations found in the tool's sources
    Scan {
        #[command(flatten)]
        tool: ToolArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

pub fn sync_document(layout: &ToolLayout, config: &Config, dry_run: bool, check: bool) -> Result<()> {
    let index = scan_directory(&layout.src_dir, &config.extension)?;
    tracing::info!(
        "Found {} declarations in {} files under {}",
        index.len(),
        index.files().len(),
        layout.src_dir.display()
    );
    if index.is_empty() {
        tracing::warn!("No declarations found under {}", layout.src_dir.display());
    }

    let rewriter = DocumentRewriter::new(config.markers.clone());

    if dry_run || check {
        let rewrite = rewriter.preview_file(&layout.doc_path, &index)?;
        if dry_run {
            print!("{}", rewrite.content);
        }
        print_report(layout, &rewrite.report);
        if check && rewrite.report.changed {
            return Err(SyncError::OutOfDate(layout.doc_path.clone()));
        }
        return Ok(());
    }

    let report = rewriter.rewrite_file(&layout.doc_path, &index)?;
    print_report(layout, &report);
    Ok(())
}

fn print_report(layout: &ToolLayout, report: &RewriteReport) {
    for section in &report.filled {
        tracing::debug!(
            "  {} <- {}:{}-{}",
            section.title,
            section.source_path.display(),
            section.first_line + 1,
            section.last_line + 1
        );
    }
    tracing::info!(
        "{}: {} sections filled, {} stale lines removed{}",
        layout.doc_path.display(),
        report.filled.len(),
        report.stale_lines_removed,
        if report.changed { "" } else { " (up to date)" }
    );
}

#[derive(Serialize)]
struct ScanEntry {
    name: String,
    kind: DeclarationKind,
    source_path: PathBuf,
    first_line: usize,
    last_line: usize,
    documented: bool,
}

pub fn scan_declarations(layout: &ToolLayout, config: &Config, format: &str) -> Result<()> {
    let index = scan_directory(&layout.src_dir, &config.extension)?;

    let titles: Vec<String> = match fs::read_to_string(&layout.doc_path) {
        Ok(content) => DocParser::headers(&content)
            .into_iter()
            .map(|h| h.title)
            .collect(),
        Err(e) => {
            tracing::warn!("Cannot read {}: {}", layout.doc_path.display(), e);
            Vec::new()
        }
    };

    let entries: Vec<ScanEntry> = index
        .declarations()
        .map(|d| ScanEntry {
            name: d.name.clone(),
            kind: d.kind,
            source_path: d.source_path.clone(),
            first_line: d.first_line,
            last_line: d.last_line,
            documented: titles.contains(&d.name),
        })
        .collect();

    if format == "json" {
        let output = serde_json::to_string_pretty(&entries)?;
        println!("{}", output);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No declarations found under {}", layout.src_dir.display());
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{} {:<8} {:<32} {}:{}",
            if entry.documented { "*" } else { " " },
            entry.kind.as_str(),
            entry.name,
            entry.source_path.display(),
            entry.first_line + 1
        );
    }
    let documented = entries.iter().filter(|e| e.documented).count();
    println!(
        "\n{} declarations, {} with a section in {}",
        entries.len(),
        documented,
        layout.doc_path.display()
    );

    Ok(())
}
