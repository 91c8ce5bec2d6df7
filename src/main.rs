mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

// Re-export from lib for internal use
use sdd_sync::{config, docs, error, indexer};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sdd_sync=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Sync {
            tool,
            dry_run,
            check,
        } => {
            let layout = tool.layout(&config);
            cli::sync_document(&layout, &config, dry_run, check)?;
        }
        Commands::Scan { tool, format } => {
            let layout = tool.layout(&config);
            cli::scan_declarations(&layout, &config, &format)?;
        }
    }

    Ok(())
}
