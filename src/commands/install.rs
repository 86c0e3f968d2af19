//! # Install Command Implementation
//!
//! This module implements the `install` subcommand. It clones every repository
//! listed in the manifest into the base directory, checks out the revisions
//! recorded in an existing lock (or pinned in the manifest), and writes the
//! resolved state back to the lock file.
//!
//! Running `install` twice is safe: checkouts that already exist are reused,
//! and the lock keeps every entry at the revision it recorded the first time.

use anyhow::Result;
use clap::Args;

use repofetch::config::Config;
use repofetch::orchestrator::{self, EntryOutcome};
use repofetch::output::OutputConfig;
use repofetch::repository::RepositoryManager;

/// Clone every repository in the manifest and write the lock file
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Suppress the summary printed after a successful run
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `install` command.
pub fn execute(args: InstallArgs, config: &Config, output: &OutputConfig) -> Result<()> {
    let manager = RepositoryManager::new();
    let report = orchestrator::install(config, &manager)?;

    if !args.quiet {
        println!(
            "{} Installed {} repositories ({} cloned, {} reused, {} pinned)",
            output.emoji("✅", "[OK]"),
            report.lock.len(),
            report.count(EntryOutcome::Cloned),
            report.count(EntryOutcome::Reused),
            report.count(EntryOutcome::Pinned),
        );
        println!("   Lock written to: {}", config.lock_path.display());
    }

    Ok(())
}
