//! Run configuration.
//!
//! A `Config` is built once at process start (from CLI flags and their
//! environment fallbacks) and passed by reference into the install and update
//! workflows. Nothing in the library reads global state.

use std::path::{Path, PathBuf};

use crate::defaults;
use crate::record::RecordSet;

/// Paths an install or update run works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Manifest to read. Never written.
    pub manifest_path: PathBuf,
    /// Lock to read and (re)write.
    pub lock_path: PathBuf,
    /// Overrides the record set's `base_directory` when set.
    pub base_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_path: defaults::default_manifest_path(),
            lock_path: defaults::default_lock_path(),
            base_dir: None,
        }
    }
}

impl Config {
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }

    pub fn with_lock_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.lock_path = path.into();
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Directory the entries of `records` are installed under.
    ///
    /// Precedence: the `base_dir` override, then `records.base_directory`,
    /// then [`defaults::BASE_DIR`].
    pub fn install_root(&self, records: &RecordSet) -> PathBuf {
        if let Some(dir) = &self.base_dir {
            return dir.clone();
        }
        match records.base_directory.as_deref().filter(|d| !d.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(defaults::BASE_DIR),
        }
    }

    /// Full path of the checkout for `directory`.
    pub fn install_path(&self, records: &RecordSet, directory: &str) -> PathBuf {
        self.install_root(records).join(Path::new(directory))
    }
}
