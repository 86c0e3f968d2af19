//! # Manifest/Lock Reconciliation
//!
//! Before an install, the manifest (what the user wants) and the previous lock
//! (what was resolved last time) are merged into a single working set:
//!
//! - The manifest decides **membership and order**. Every manifest entry
//!   appears in the output, in manifest order, and nothing else does.
//! - The lock decides **resolved values**. When the lock has an entry for the
//!   same URL, that entry replaces the manifest entry entirely, so a previously
//!   recorded directory and hash survive later edits to the manifest hints.
//! - The base directory always comes from the manifest.
//!
//! Neither input is modified; the merged set is a new value.

use log::debug;

use crate::record::{RecordSet, RepositoryEntry};

/// Merges `manifest` with `lock` into the working set for an install.
///
/// If the lock holds the same URL more than once, the last occurrence wins.
pub fn merge(manifest: &RecordSet, lock: &RecordSet) -> RecordSet {
    let repositories = manifest
        .repositories
        .iter()
        .map(|declared| reconcile_entry(declared, lock))
        .collect();

    RecordSet {
        base_directory: manifest.base_directory.clone(),
        repositories,
    }
}

fn reconcile_entry(declared: &RepositoryEntry, lock: &RecordSet) -> RepositoryEntry {
    match lock.find(&declared.url) {
        Some(locked) => {
            debug!("Using locked state for {}", declared.url);
            locked.clone()
        }
        None => declared.clone(),
    }
}
