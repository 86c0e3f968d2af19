//! Default values for repofetch configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Manifest file read when `--manifest` is not given.
pub const MANIFEST_FILE: &str = "repofetch-manifest.yaml";

/// Lock file read and written when `--lock` is not given.
pub const LOCK_FILE: &str = "repofetch-lock.yaml";

/// Install root used when neither `--base-dir` nor the manifest's
/// `base_directory` is set.
pub const BASE_DIR: &str = "repos";

/// Returns the default manifest path, relative to the working directory.
pub fn default_manifest_path() -> PathBuf {
    PathBuf::from(MANIFEST_FILE)
}

/// Returns the default lock path, relative to the working directory.
pub fn default_lock_path() -> PathBuf {
    PathBuf::from(LOCK_FILE)
}
