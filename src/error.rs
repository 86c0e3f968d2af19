//! # Error Handling
//!
//! This module defines the centralized error type for `repofetch`. It uses
//! `thiserror` to describe every failure the install and update workflows can
//! hit, with enough context (path, URL, hash, underlying cause) to tell which
//! repository entry failed.
//!
//! ## Key Components
//!
//! - **`Error`**: one variant per failure class:
//!   - reading or parsing a manifest/lock (`RecordRead`)
//!   - deriving a directory from a URL (`InvalidUrl`)
//!   - the git backend (`Clone`, `Checkout`, `Fetch`)
//!   - persisting the lock (`RecordWrite`)
//!
//! - **`Result<T>`**: alias for `std::result::Result<T, Error>`.
//!
//! Every error is fatal to the run. The single backend outcome that looks like
//! a failure but is not, "already up to date" during a pull, never reaches this
//! type: it is reported as [`crate::git::PullOutcome::AlreadyCurrent`].

use std::path::PathBuf;

use thiserror::Error;

fn render_hint(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for repofetch operations
#[derive(Error, Debug)]
pub enum Error {
    /// A manifest or lock file could not be read, parsed, or failed
    /// validation (e.g. duplicate URLs in a manifest).
    #[error("Failed to read records from {}: {message}{}", path.display(), render_hint(hint))]
    RecordRead {
        path: PathBuf,
        message: String,
        /// Optional hint for how to fix the problem
        hint: Option<String>,
    },

    /// A lock file could not be serialized or written.
    #[error("Failed to write records to {}: {message}", path.display())]
    RecordWrite { path: PathBuf, message: String },

    /// No local directory name could be derived from a repository URL.
    #[error("Invalid repository URL {url:?}: {message}")]
    InvalidUrl { url: String, message: String },

    /// Cloning a repository failed.
    #[error("Git clone error for {url} into {}: {message}{}", path.display(), render_hint(hint))]
    Clone {
        url: String,
        path: PathBuf,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// Checking out a pinned revision failed.
    #[error("Git checkout error for {url} at {hash} in {}: {message}", path.display())]
    Checkout {
        url: String,
        path: PathBuf,
        hash: String,
        message: String,
    },

    /// Fetching or fast-forwarding a repository failed.
    #[error("Git fetch error for {url} in {}: {message}{}", path.display(), render_hint(hint))]
    Fetch {
        url: String,
        path: PathBuf,
        message: String,
        /// Optional hint for how to resolve the fetch issue
        hint: Option<String>,
    },
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
