//! Command-line interface for releasenotes-migrate.
//!
//! All business logic lives in `releasenotes-core`; this module parses
//! arguments, loads configuration, picks a submitter and prints the report.
//!
//! - `migrate` formats every note under `source_dir` and submits it
//! - `collect` copies `releasenotes.yaml` files out of a docs checkout into `source_dir`

use crate::load_config::load_config;
use crate::upload::{DryRunSubmitter, ReleaseNotesClient};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use releasenotes_core::collect::collect_release_notes;
use releasenotes_core::contract::Submitter;
use releasenotes_core::process::{process_directory, MigrationReport};
use std::path::PathBuf;

/// CLI for releasenotes-migrate: move documentation release notes into the release-notes service.
#[derive(Parser)]
#[clap(
    name = "releasenotes-migrate",
    version,
    about = "Migrate release notes from documentation YAML files into the release-notes admin API"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Format and submit every release note found in the configured source directory
    Migrate {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
        /// Print payloads instead of sending them
        #[clap(long)]
        dry_run: bool,
    },
    /// Copy releasenotes.yaml files from the docs repository into the source directory
    Collect {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Migrate { config, dry_run } => {
            let config = load_config(config)?;
            let dry_run = dry_run || config.dry_run;
            tracing::info!(command = "migrate", dry_run, "Starting migration");

            let submitter: Box<dyn Submitter> = if dry_run {
                Box::new(DryRunSubmitter)
            } else {
                Box::new(ReleaseNotesClient::new(config.require_endpoint()?))
            };

            let report = process_directory(&config.source_dir, &config.process, submitter.as_ref())
                .await
                .with_context(|| format!("Migration of {} failed", config.source_dir.display()))?;
            print_report(&report);
            Ok(())
        }
        Commands::Collect { config } => {
            let config = load_config(config)?;
            let collect = config
                .collect
                .as_ref()
                .context("config has no `collect` section")?;
            tracing::info!(command = "collect", docs_root = %collect.docs_root.display(), "Starting collection");
            let collected = collect_release_notes(&collect.docs_root, &config.source_dir)?;
            for file in &collected {
                println!(
                    "Copied {} to {}",
                    file.source.display(),
                    file.destination.display()
                );
            }
            println!("Collected {} release-notes file(s).", collected.len());
            Ok(())
        }
    }
}

fn print_report(report: &MigrationReport) {
    println!("Migration complete.");
    for file in &report.files {
        match &file.error {
            Some(e) => println!("  {}: skipped ({e})", file.filename),
            None => println!(
                "  {}: {} submitted, {} failed, {} skipped",
                file.filename, file.submitted, file.failed, file.skipped
            ),
        }
    }
    println!(
        "Total: {} submitted, {} failed, {} skipped, {} file(s) not processed",
        report.submitted(),
        report.failed(),
        report.skipped(),
        report.failed_files().count()
    );
}
