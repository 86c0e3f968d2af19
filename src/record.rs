//! # Manifest and Lock Records
//!
//! This module defines the record format shared by the manifest
//! (`repofetch-manifest.yaml`) and the lock (`repofetch-lock.yaml`), and the
//! functions that read and write it.
//!
//! Both files have the same shape:
//!
//! ```yaml
//! base_directory: repos
//! repositories:
//! - url: https://github.com/example/tools.git
//!   directory: tools
//!   hash: 4b825dc642cb6eb9a060e54bf8d69288fbee4904
//! ```
//!
//! Field absence is meaningful. An entry without `hash` tracks the latest
//! commit, an entry without `directory` derives one from its URL. Absent
//! fields are skipped on write so they stay absent, and empty strings are
//! treated as unset when read back through [`RepositoryEntry::pinned_hash`]
//! and [`RepositoryEntry::explicit_directory`].

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Comment written at the top of every lock file.
pub const LOCK_HEADER: &str =
    "# This file is generated by repofetch. Do not edit it by hand.\n";

/// A single tracked repository.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepositoryEntry {
    /// Clone URL. Unique within a manifest.
    pub url: String,
    /// Directory name under the base directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    /// Resolved or pinned commit hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl RepositoryEntry {
    /// Creates an entry that tracks the latest commit of `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            directory: None,
            hash: None,
        }
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// The hash this entry is fixed at, if any. Empty strings count as unset.
    pub fn pinned_hash(&self) -> Option<&str> {
        self.hash.as_deref().filter(|h| !h.is_empty())
    }

    /// The directory given explicitly for this entry. Empty strings count as
    /// unset.
    pub fn explicit_directory(&self) -> Option<&str> {
        self.directory.as_deref().filter(|d| !d.is_empty())
    }
}

/// An ordered set of repository entries with an optional shared base
/// directory. Used for both the manifest and the lock.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordSet {
    /// Root under which entry directories are placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_directory: Option<String>,
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry>,
}

impl RecordSet {
    /// Creates an empty set sharing `base_directory`.
    pub fn with_base_directory(base_directory: Option<String>) -> Self {
        Self {
            base_directory,
            repositories: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    /// Finds the entry for `url`. When a set carries the same URL more than
    /// once the last one wins.
    pub fn find(&self, url: &str) -> Option<&RepositoryEntry> {
        self.repositories.iter().rev().find(|entry| entry.url == url)
    }

    /// Checks the manifest invariants: every entry has a URL and no URL is
    /// declared twice. `path` names the manifest in the error.
    pub fn validate_manifest(&self, path: &Path) -> Result<()> {
        let invalid = |message: String| Error::RecordRead {
            path: path.to_path_buf(),
            message,
            hint: None,
        };

        let mut seen = HashSet::new();
        for (index, entry) in self.repositories.iter().enumerate() {
            if entry.url.trim().is_empty() {
                return Err(invalid(format!(
                    "repository #{} has an empty url",
                    index + 1
                )));
            }
            if !seen.insert(entry.url.as_str()) {
                return Err(invalid(format!(
                    "repository {} is declared more than once",
                    entry.url
                )));
            }
        }
        Ok(())
    }
}

/// Parses a record set from YAML text. A document holding nothing but blank
/// lines and comments yields an empty set.
pub fn parse(content: &str) -> std::result::Result<RecordSet, serde_yaml::Error> {
    let blank = content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(RecordSet::default());
    }
    serde_yaml::from_str(content)
}

/// Reads a record set from `path`.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<RecordSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::RecordRead {
        path: path.to_path_buf(),
        message: e.to_string(),
        hint: None,
    })?;
    parse(&content).map_err(|e| Error::RecordRead {
        path: path.to_path_buf(),
        message: e.to_string(),
        hint: None,
    })
}

/// Renders a record set as lock file text, header included.
pub fn to_lock_string(records: &RecordSet) -> std::result::Result<String, serde_yaml::Error> {
    let body = serde_yaml::to_string(records)?;
    Ok(format!("{}{}", LOCK_HEADER, body))
}

/// Writes `records` to `path` as a lock file, replacing any previous content.
///
/// The text goes to a sibling temporary file first and is renamed into place,
/// so a failed write leaves the previous lock intact.
pub fn write_lock<P: AsRef<Path>>(path: P, records: &RecordSet) -> Result<()> {
    let path = path.as_ref();
    let write_error = |message: String| Error::RecordWrite {
        path: path.to_path_buf(),
        message,
    };

    let content = to_lock_string(records).map_err(|e| write_error(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
    }

    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    fs::write(&staging, content).map_err(|e| write_error(e.to_string()))?;
    fs::rename(&staging, path).map_err(|e| {
        let _ = fs::remove_file(&staging);
        write_error(e.to_string())
    })
}
