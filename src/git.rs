//! Git primitives backed by the system `git` executable.
//!
//! Using the installed `git` means authentication works the way it does on the
//! command line:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! Every function here blocks until the child process exits.

use std::fs;
use std::path::Path;
use std::process::Command;

use log::debug;

use crate::error::{Error, Result};

/// Name of the remote every clone tracks.
pub const REMOTE: &str = "origin";

/// Result of advancing a checkout to its remote's latest commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullOutcome {
    /// The head moved to a new commit.
    Updated(String),
    /// The remote had nothing new; the head is unchanged.
    AlreadyCurrent(String),
}

impl PullOutcome {
    /// The head hash after the pull.
    pub fn hash(&self) -> &str {
        match self {
            PullOutcome::Updated(hash) | PullOutcome::AlreadyCurrent(hash) => hash,
        }
    }
}

/// Runs `git` with `args`, optionally inside `dir`, and returns trimmed
/// stdout. On failure the error carries git's stderr.
fn run_git(dir: Option<&Path>, args: &[&str]) -> std::result::Result<String, String> {
    let mut command = Command::new("git");
    if let Some(dir) = dir {
        command.arg("-C").arg(dir);
    }
    command.args(args);
    debug!("Running git {}", args.join(" "));

    let output = command
        .output()
        .map_err(|e| format!("failed to run git: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(if stderr.is_empty() {
            format!("git {} exited with {}", args.join(" "), output.status)
        } else {
            stderr
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Hint shown for remote failures that look like missing credentials.
fn auth_hint(stderr: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        Some(
            "Make sure you have access to the repository. For private repos, ensure you have \
             an SSH key added to ssh-agent, git credentials configured, or a personal access \
             token set up."
                .to_string(),
        )
    } else {
        None
    }
}

/// Whether `dir` holds a git checkout.
pub fn is_repository(dir: &Path) -> bool {
    dir.join(".git").exists()
}

/// Clones `url` into `target_dir`, creating parent directories as needed.
pub fn clone(url: &str, target_dir: &Path) -> Result<()> {
    let clone_error = |message: String, hint: Option<String>| Error::Clone {
        url: url.to_string(),
        path: target_dir.to_path_buf(),
        message,
        hint,
    };

    if let Some(parent) = target_dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| clone_error(e.to_string(), None))?;
    }

    let target = target_dir.to_string_lossy();
    run_git(None, &["clone", "--quiet", "--origin", REMOTE, "--", url, &target]).map_err(|stderr| {
        let hint = auth_hint(&stderr);
        clone_error(stderr, hint)
    })?;
    Ok(())
}

/// Returns the commit hash `HEAD` points at.
pub fn head(dir: &Path) -> std::result::Result<String, String> {
    run_git(Some(dir), &["rev-parse", "HEAD"])
}

/// Returns the URL of `origin` in the checkout at `dir`.
pub fn origin_url(dir: &Path) -> std::result::Result<String, String> {
    run_git(Some(dir), &["remote", "get-url", REMOTE])
}

fn has_commit(dir: &Path, hash: &str) -> bool {
    run_git(Some(dir), &["cat-file", "-e", &format!("{}^{{commit}}", hash)]).is_ok()
}

/// Checks out `hash` as a detached head.
///
/// When the commit is not in the local object store, `origin` is fetched once
/// before giving up.
pub fn checkout(url: &str, dir: &Path, hash: &str) -> Result<()> {
    let checkout_error = |message: String| Error::Checkout {
        url: url.to_string(),
        path: dir.to_path_buf(),
        hash: hash.to_string(),
        message,
    };

    if !has_commit(dir, hash) {
        debug!("{} not present in {}, fetching {}", hash, dir.display(), REMOTE);
        run_git(Some(dir), &["fetch", "--quiet", REMOTE]).map_err(checkout_error)?;
        if !has_commit(dir, hash) {
            return Err(checkout_error(format!(
                "commit {} does not exist in the fetched history",
                hash
            )));
        }
    }

    run_git(Some(dir), &["checkout", "--quiet", "--detach", hash]).map_err(checkout_error)?;
    Ok(())
}

/// Fetches `origin` and fast-forwards the current branch to its upstream.
///
/// A detached checkout (left behind by a pinned install) is first moved back
/// onto the branch `origin/HEAD` names. Being already up to date is reported
/// as [`PullOutcome::AlreadyCurrent`], not as an error.
pub fn pull(url: &str, dir: &Path) -> Result<PullOutcome> {
    let fetch_error = |message: String| {
        let hint = if is_repository(dir) {
            auth_hint(&message)
        } else {
            Some("the repository is not installed; run `repofetch install` first".to_string())
        };
        Error::Fetch {
            url: url.to_string(),
            path: dir.to_path_buf(),
            message,
            hint,
        }
    };

    if !is_repository(dir) {
        return Err(fetch_error("not a git checkout".to_string()));
    }

    let before = head(dir).map_err(fetch_error)?;
    run_git(Some(dir), &["fetch", "--quiet", REMOTE]).map_err(fetch_error)?;

    let branch = match run_git(Some(dir), &["symbolic-ref", "--quiet", "--short", "HEAD"]) {
        Ok(branch) => branch,
        Err(_) => {
            let branch = default_branch(dir).map_err(fetch_error)?;
            debug!("Detached head in {}, switching to {}", dir.display(), branch);
            run_git(Some(dir), &["checkout", "--quiet", &branch]).map_err(fetch_error)?;
            branch
        }
    };

    let upstream = format!("{}/{}", REMOTE, branch);
    run_git(Some(dir), &["merge", "--quiet", "--ff-only", &upstream]).map_err(fetch_error)?;

    let after = head(dir).map_err(fetch_error)?;
    if after == before {
        Ok(PullOutcome::AlreadyCurrent(after))
    } else {
        Ok(PullOutcome::Updated(after))
    }
}

/// The branch `origin/HEAD` points at, without the remote prefix.
fn default_branch(dir: &Path) -> std::result::Result<String, String> {
    let remote_head = format!("refs/remotes/{}/HEAD", REMOTE);
    let full = run_git(Some(dir), &["symbolic-ref", "--quiet", "--short", &remote_head])
        .map_err(|e| format!("cannot determine the default branch of {}: {}", REMOTE, e))?;
    let prefix = format!("{}/", REMOTE);
    Ok(full.strip_prefix(&prefix).unwrap_or(&full).to_string())
}
