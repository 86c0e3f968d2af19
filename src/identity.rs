//! Repository identity: the local directory name an entry is installed into.
//!
//! An explicit `directory` always wins. Otherwise the name is derived from the
//! last segment of the URL path with a trailing `.git` removed, so
//! `https://github.com/example/tools.git` installs into `tools`.
//!
//! Besides absolute URLs, the two other address forms git accepts are
//! understood: scp-like addresses (`git@github.com:example/tools.git`) and
//! plain filesystem paths (`/srv/git/tools.git`).

use url::Url;

use crate::error::{Error, Result};
use crate::record::RepositoryEntry;

/// Returns the directory name `entry` is installed into.
///
/// The explicit directory is returned unchanged and is not checked for
/// filesystem safety.
pub fn resolve_directory(entry: &RepositoryEntry) -> Result<String> {
    match entry.explicit_directory() {
        Some(directory) => Ok(directory.to_string()),
        None => directory_from_url(&entry.url),
    }
}

/// Derives a directory name from a repository URL.
pub fn directory_from_url(raw: &str) -> Result<String> {
    let invalid = |message: String| Error::InvalidUrl {
        url: raw.to_string(),
        message,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid("url is empty".to_string()));
    }
    if trimmed.starts_with('-') {
        return Err(invalid("url must not start with '-'".to_string()));
    }

    let path = match Url::parse(trimmed) {
        Ok(url) => url.path().to_string(),
        Err(url::ParseError::RelativeUrlWithoutBase) => non_url_path(trimmed).to_string(),
        Err(e) => return Err(invalid(e.to_string())),
    };

    let last = path.trim_matches('/').rsplit('/').next().unwrap_or_default();
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() || name == "." || name == ".." {
        return Err(invalid(
            "no path segment to derive a directory name from".to_string(),
        ));
    }
    Ok(name.to_string())
}

/// Path part of an address that is not an absolute URL.
///
/// `host:path` with no slash before the colon is scp-like syntax; anything
/// else is a local path.
fn non_url_path(address: &str) -> &str {
    match address.find(':') {
        Some(colon) if colon > 0 && !address[..colon].contains('/') => &address[colon + 1..],
        _ => address,
    }
}
