//! # Update Command Implementation
//!
//! This module implements the `update` subcommand. Every repository that is
//! not pinned in the manifest is pulled from `origin`, and the lock file is
//! rewritten with the new revisions. Pinned repositories are left alone and
//! keep their pinned revision in the lock.
//!
//! `update` needs a lock from a previous `install`; it fails without one.

use anyhow::Result;
use clap::Args;

use repofetch::config::Config;
use repofetch::orchestrator::{self, EntryOutcome};
use repofetch::output::OutputConfig;
use repofetch::repository::RepositoryManager;

/// Pull the latest commit of every unpinned repository and rewrite the lock file
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Suppress the summary printed after a successful run
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs, config: &Config, output: &OutputConfig) -> Result<()> {
    let manager = RepositoryManager::new();
    let report = orchestrator::update(config, &manager)?;

    if !args.quiet {
        let updated = report.count(EntryOutcome::Updated);
        let marker = if updated > 0 {
            output.emoji("🔄", "[UPDATED]")
        } else {
            output.emoji("✅", "[OK]")
        };
        println!(
            "{} {} updated, {} already up to date, {} pinned",
            marker,
            updated,
            report.count(EntryOutcome::AlreadyCurrent),
            report.count(EntryOutcome::Skipped),
        );
        println!("   Lock written to: {}", config.lock_path.display());
    }

    Ok(())
}
