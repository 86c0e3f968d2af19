//! # repofetch
//!
//! This library fetches a set of git repositories described by a manifest and
//! records the exact revision of each one in a lock file, so a later install
//! reproduces the same checkouts. It backs the `repofetch` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use repofetch::record::{self, RecordSet, RepositoryEntry};
//! use repofetch::{identity, reconcile};
//!
//! let manifest = record::parse(r#"
//! repositories:
//!   - url: https://github.com/example/tools.git
//!   - url: https://github.com/example/docs.git
//!     directory: manual
//! "#).unwrap();
//!
//! let lock = RecordSet {
//!     base_directory: None,
//!     repositories: vec![RepositoryEntry::new("https://github.com/example/tools.git")
//!         .with_directory("tools")
//!         .with_hash("4b825dc642cb6eb9a060e54bf8d69288fbee4904")],
//! };
//!
//! let working = reconcile::merge(&manifest, &lock);
//! assert_eq!(working.repositories[0].pinned_hash(), Some("4b825dc642cb6eb9a060e54bf8d69288fbee4904"));
//! assert_eq!(identity::resolve_directory(&working.repositories[1]).unwrap(), "manual");
//! ```
//!
//! ## Core Concepts
//!
//! - **Records (`record`)**: the manifest and lock share one YAML format, an
//!   ordered list of `{url, directory, hash}` entries plus an optional base
//!   directory.
//! - **Identity (`identity`)**: the directory an entry is installed into,
//!   explicit or derived from its URL.
//! - **Reconciliation (`reconcile`)**: merging the manifest with the previous
//!   lock before an install. The manifest decides which repositories exist,
//!   the lock decides their revisions.
//! - **Synchronization (`repository`, `git`)**: clone, checkout and pull
//!   through the `GitOperations` trait, backed by the system `git` command.
//! - **Workflows (`orchestrator`)**: `install` and `update`, which combine the
//!   above and write the lock only after every entry succeeded.
//! - **Configuration (`config`, `defaults`)**: the file paths and install root
//!   a run works with.

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod identity;
pub mod orchestrator;
pub mod output;
pub mod reconcile;
pub mod record;
pub mod repository;

#[cfg(test)]
mod record_proptest;
