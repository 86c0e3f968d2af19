//! # Repository Synchronization
//!
//! This module provides the `RepositoryManager`, which drives the per-entry
//! git work of an install or update: clone a missing checkout, pin it to a
//! hash, or advance it to the latest remote commit.
//!
//! ## Design
//!
//! The manager talks to git only through the **`GitOperations`** trait. The
//! application uses `DefaultGitOperations`, which wraps the system `git`
//! command (see [`crate::git`]). Tests inject an in-memory implementation so
//! the install and update workflows can be exercised without touching git or
//! the network.

use std::path::Path;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::git::PullOutcome;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations: Send + Sync {
    /// Whether `dir` already holds a checkout.
    fn is_repository(&self, dir: &Path) -> bool;

    /// Full clone of `url` into `dir`.
    fn clone_repository(&self, url: &str, dir: &Path) -> Result<()>;

    /// URL `origin` points at in the checkout at `dir`, if it can be read.
    fn origin_url(&self, dir: &Path) -> Option<String>;

    /// Hash of the commit checked out in `dir`.
    fn head(&self, url: &str, dir: &Path) -> Result<String>;

    /// Checks out `hash` in `dir`.
    fn checkout(&self, url: &str, dir: &Path, hash: &str) -> Result<()>;

    /// Pulls the tracking branch from `origin`.
    fn pull(&self, url: &str, dir: &Path) -> Result<PullOutcome>;
}

/// The default implementation of `GitOperations`, which uses the system's
/// `git` command to perform real Git operations.
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn is_repository(&self, dir: &Path) -> bool {
        crate::git::is_repository(dir)
    }

    fn clone_repository(&self, url: &str, dir: &Path) -> Result<()> {
        crate::git::clone(url, dir)
    }

    fn origin_url(&self, dir: &Path) -> Option<String> {
        crate::git::origin_url(dir).ok()
    }

    fn head(&self, url: &str, dir: &Path) -> Result<String> {
        crate::git::head(dir).map_err(|message| Error::Clone {
            url: url.to_string(),
            path: dir.to_path_buf(),
            message: format!("cannot resolve HEAD: {}", message),
            hint: None,
        })
    }

    fn checkout(&self, url: &str, dir: &Path, hash: &str) -> Result<()> {
        crate::git::checkout(url, dir, hash)
    }

    fn pull(&self, url: &str, dir: &Path) -> Result<PullOutcome> {
        crate::git::pull(url, dir)
    }
}

/// Drives clone, checkout and pull for individual repository entries.
pub struct RepositoryManager {
    git_ops: Box<dyn GitOperations>,
}

impl RepositoryManager {
    /// Creates a manager backed by the system `git` command.
    pub fn new() -> Self {
        Self {
            git_ops: Box::new(DefaultGitOperations),
        }
    }

    /// Creates a manager with a custom `GitOperations` implementation.
    pub fn with_operations(git_ops: Box<dyn GitOperations>) -> Self {
        Self { git_ops }
    }

    /// Makes sure `dir` holds a checkout of `url` and returns its head hash.
    ///
    /// A missing checkout is cloned; an existing one is reused as-is. Reusing
    /// a checkout whose `origin` is some other URL logs a warning.
    pub fn ensure_present(&self, url: &str, dir: &Path) -> Result<Presence> {
        if self.git_ops.is_repository(dir) {
            info!("Using existing checkout of {} at {}", url, dir.display());
            if let Some(origin) = self.git_ops.origin_url(dir) {
                if origin != url {
                    warn!(
                        "Checkout at {} tracks {} but the manifest lists {}",
                        dir.display(),
                        origin,
                        url
                    );
                }
            }
            let hash = self.git_ops.head(url, dir)?;
            return Ok(Presence::Reused(hash));
        }

        info!("Cloning {} to {}", url, dir.display());
        self.git_ops.clone_repository(url, dir)?;
        let hash = self.git_ops.head(url, dir)?;
        Ok(Presence::Cloned(hash))
    }

    /// Checks out `hash` in the checkout at `dir`.
    pub fn pin(&self, url: &str, dir: &Path, hash: &str) -> Result<()> {
        self.git_ops.checkout(url, dir, hash)?;
        info!("Checked out {} at {}", url, hash);
        Ok(())
    }

    /// Pulls the latest commit into the checkout at `dir`.
    ///
    /// "Already up to date" is a successful [`PullOutcome::AlreadyCurrent`].
    pub fn advance(&self, url: &str, dir: &Path) -> Result<PullOutcome> {
        info!("Pulling {} in {}", url, dir.display());
        let outcome = self.git_ops.pull(url, dir)?;
        match &outcome {
            PullOutcome::Updated(hash) => info!("Updated {} to {}", url, hash),
            PullOutcome::AlreadyCurrent(hash) => info!("{} is already up to date at {}", url, hash),
        }
        Ok(outcome)
    }
}

impl Default for RepositoryManager {
    fn default() -> Self {
        Self::new()
    }
}

/// How [`RepositoryManager::ensure_present`] found the checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// Freshly cloned; carries the default branch head.
    Cloned(String),
    /// Already on disk; carries its current head.
    Reused(String),
}

impl Presence {
    pub fn hash(&self) -> &str {
        match self {
            Presence::Cloned(hash) | Presence::Reused(hash) => hash,
        }
    }
}
