//! # Install and Update Workflows
//!
//! The two top-level operations. Both read the manifest, walk its entries in
//! order doing the git work for each one, and finish by writing a complete
//! new lock.
//!
//! ## Install
//!
//! 1. Read the manifest, and the lock if one exists.
//! 2. Reconcile them ([`crate::reconcile::merge`]); without a lock the
//!    manifest is the working set.
//! 3. Per entry: resolve its directory, clone it if missing, check out the
//!    entry's hash if it has one, otherwise record the cloned head.
//! 4. Write the lock.
//!
//! ## Update
//!
//! 1. Read the manifest and the existing lock (both required).
//! 2. Per manifest entry: entries pinned in the manifest are skipped and
//!    carried into the new lock unchanged; every other entry is pulled in the
//!    directory recorded by the old lock, and its new head recorded.
//! 3. Write the lock.
//!
//! Any error stops the run before the lock is written, so a failed run never
//! leaves a partial lock behind.

use log::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::PullOutcome;
use crate::identity::resolve_directory;
use crate::reconcile;
use crate::record::{self, RecordSet, RepositoryEntry};
use crate::repository::{Presence, RepositoryManager};

/// What happened to one entry during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Cloned and left at the default branch head.
    Cloned,
    /// Existing checkout reused at its current head.
    Reused,
    /// Checked out at the entry's hash.
    Pinned,
    /// Pulled to a newer commit.
    Updated,
    /// Pulled, nothing new on the remote.
    AlreadyCurrent,
    /// Pinned in the manifest; no git work was done.
    Skipped,
}

/// Result of an install or update run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The lock as written.
    pub lock: RecordSet,
    /// One outcome per lock entry, in the same order.
    pub outcomes: Vec<EntryOutcome>,
}

impl Report {
    fn new(base_directory: Option<String>) -> Self {
        Self {
            lock: RecordSet::with_base_directory(base_directory),
            outcomes: Vec::new(),
        }
    }

    fn push(&mut self, entry: RepositoryEntry, outcome: EntryOutcome) {
        self.lock.repositories.push(entry);
        self.outcomes.push(outcome);
    }

    /// Number of entries that ended with `outcome`.
    pub fn count(&self, outcome: EntryOutcome) -> usize {
        self.outcomes.iter().filter(|o| **o == outcome).count()
    }
}

/// Reads and validates the manifest at `config.manifest_path`.
pub fn load_manifest(config: &Config) -> Result<RecordSet> {
    let path = &config.manifest_path;
    if !path.exists() {
        return Err(Error::RecordRead {
            path: path.clone(),
            message: "manifest not found".to_string(),
            hint: Some("create the manifest or point --manifest at it".to_string()),
        });
    }
    let manifest = record::from_file(path)?;
    manifest.validate_manifest(path)?;
    Ok(manifest)
}

/// Reads the lock at `config.lock_path`, or `None` when there is no lock yet.
pub fn load_lock(config: &Config) -> Result<Option<RecordSet>> {
    if !config.lock_path.exists() {
        return Ok(None);
    }
    record::from_file(&config.lock_path).map(Some)
}

/// Runs an install and writes the resulting lock.
pub fn install(config: &Config, manager: &RepositoryManager) -> Result<Report> {
    info!("Installing repositories from {}", config.manifest_path.display());
    let manifest = load_manifest(config)?;

    let working = match load_lock(config)? {
        Some(lock) => {
            info!("Reconciling with lock {}", config.lock_path.display());
            reconcile::merge(&manifest, &lock)
        }
        None => manifest,
    };

    let report = install_records(config, manager, &working)?;
    record::write_lock(&config.lock_path, &report.lock)?;
    info!("Wrote lock {}", config.lock_path.display());
    Ok(report)
}

/// Installs every entry of an already reconciled working set.
///
/// Returns the lock to write; nothing is written here.
pub fn install_records(
    config: &Config,
    manager: &RepositoryManager,
    working: &RecordSet,
) -> Result<Report> {
    let mut report = Report::new(working.base_directory.clone());

    for entry in &working.repositories {
        let directory = resolve_directory(entry)?;
        let path = config.install_path(working, &directory);

        let presence = manager.ensure_present(&entry.url, &path)?;
        let (hash, outcome) = match entry.pinned_hash() {
            Some(pinned) => {
                manager.pin(&entry.url, &path, pinned)?;
                (pinned.to_string(), EntryOutcome::Pinned)
            }
            None => match presence {
                Presence::Cloned(head) => (head, EntryOutcome::Cloned),
                Presence::Reused(head) => (head, EntryOutcome::Reused),
            },
        };

        report.push(
            RepositoryEntry::new(entry.url.clone())
                .with_directory(directory)
                .with_hash(hash),
            outcome,
        );
    }

    Ok(report)
}

/// Runs an update and writes the resulting lock.
pub fn update(config: &Config, manager: &RepositoryManager) -> Result<Report> {
    info!("Updating repositories from {}", config.manifest_path.display());
    let manifest = load_manifest(config)?;
    let lock = load_lock(config)?.ok_or_else(|| Error::RecordRead {
        path: config.lock_path.clone(),
        message: "lock not found".to_string(),
        hint: Some("run `repofetch install` first".to_string()),
    })?;

    let report = update_records(config, manager, &manifest, &lock)?;
    record::write_lock(&config.lock_path, &report.lock)?;
    info!("Wrote lock {}", config.lock_path.display());
    Ok(report)
}

/// Updates every manifest entry against the previous `lock`.
///
/// Returns the new lock; nothing is written here.
pub fn update_records(
    config: &Config,
    manager: &RepositoryManager,
    manifest: &RecordSet,
    lock: &RecordSet,
) -> Result<Report> {
    let mut report = Report::new(manifest.base_directory.clone());

    for declared in &manifest.repositories {
        let previous = lock.find(&declared.url);
        let directory = match previous.and_then(RepositoryEntry::explicit_directory) {
            Some(directory) => directory.to_string(),
            None => resolve_directory(declared)?,
        };
        let carried = RepositoryEntry::new(declared.url.clone()).with_directory(directory.clone());

        if let Some(pinned) = declared.pinned_hash() {
            info!("Skipping {} as it is pinned at {}", declared.url, pinned);
            report.push(carried.with_hash(pinned), EntryOutcome::Skipped);
            continue;
        }

        let path = config.install_path(manifest, &directory);
        let (hash, outcome) = match manager.advance(&declared.url, &path)? {
            PullOutcome::Updated(hash) => (hash, EntryOutcome::Updated),
            PullOutcome::AlreadyCurrent(hash) => {
                if let Some(recorded) = previous.and_then(RepositoryEntry::pinned_hash) {
                    if recorded != hash {
                        warn!(
                            "{} is at {} but the lock recorded {}; recording {}",
                            declared.url, hash, recorded, hash
                        );
                    }
                }
                (hash, EntryOutcome::AlreadyCurrent)
            }
        };

        report.push(carried.with_hash(hash), outcome);
    }

    Ok(report)
}
