//! uploadwatch - count new files per owner and tell the other users.
//!
//! Usage:
//!   uploadwatch [CONFIG]                 Run once with CONFIG (default: config.yaml)
//!   PHOTO_DIR=/srv/photos uploadwatch    Override the configured root path
//!
//! Meant to be invoked periodically by an external scheduler such as cron.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use uploadwatch_core::{Config, FileBaselineStore};
use uploadwatch_scan::{OwnerScanner, ScanOptions, SystemOwnerResolver};
use uploadwatch_track::{LogSink, Tracker};

#[derive(Parser)]
#[command(
    name = "uploadwatch",
    version,
    about = "Report new files per owner and notify the other users",
    long_about = "uploadwatch scans a directory tree, counts the files each user owns, \
                  compares the counts with the previous run, and notifies every other \
                  configured user about new uploads."
)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(default_value = "config.yaml")]
    config: PathBuf,

    /// Root path to scan, overriding the configured one
    #[arg(long, env = "PHOTO_DIR")]
    root: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::from_path(&cli.config)
        .with_context(|| format!("Cannot load config {}", cli.config.display()))?;
    if let Some(root) = cli.root.filter(|root| !root.as_os_str().is_empty()) {
        config = config.with_root_path(root);
    }

    run(&config)
}

/// Scan the configured root and process every owner.
fn run(config: &Config) -> Result<()> {
    tracing::info!(root = %config.root_path.display(), "Scanning");

    let scanner = OwnerScanner::with_options(SystemOwnerResolver::new(), ScanOptions::from(config));
    let scan = scanner.scan(&config.root_path).context("Scan failed")?;

    let summary = Tracker::new(config, FileBaselineStore::new(), LogSink).run(&scan);
    if summary.has_failures() {
        tracing::warn!(
            failures = summary.failures.len(),
            "Some owners were skipped; their baselines are unchanged"
        );
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: info).
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
