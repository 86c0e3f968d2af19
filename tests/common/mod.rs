//! Shared test utilities for the CLI end-to-end tests.
//!
//! The fixtures build real git repositories inside a temporary directory and
//! address them with `file://` URLs, so the tests need a `git` executable but
//! no network access.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new();
//! let tools = fixture.source_repo("tools");
//! tools.commit("README.md", "hello");
//! fixture.with_manifest(&format!("repositories:\n  - url: {}\n", tools.url()));
//! fixture.command().arg("install").assert().success();
//! ```

use assert_fs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git, SourceRepo, TestFixture};
}

/// Runs git in `dir` with a fixed identity and returns trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=repofetch tests",
            "-c",
            "user.email=tests@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A git repository acting as the remote of an entry.
pub struct SourceRepo {
    path: PathBuf,
}

impl SourceRepo {
    /// `file://` URL of the repository.
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// Commits `content` to `file` and returns the new commit hash.
    pub fn commit(&self, file: &str, content: &str) -> String {
        fs::write(self.path.join(file), content).expect("Failed to write file");
        git(&self.path, &["add", file]);
        git(&self.path, &["commit", "--quiet", "-m", &format!("update {}", file)]);
        self.head()
    }

    pub fn head(&self) -> String {
        git(&self.path, &["rev-parse", "HEAD"])
    }
}

/// A temporary working directory holding the manifest, the lock, the
/// installed repositories, and the source repositories they are cloned from.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates an empty source repository under `sources/<name>`.
    #[allow(dead_code)]
    pub fn source_repo(&self, name: &str) -> SourceRepo {
        let path = self.temp_dir.path().join("sources").join(name);
        fs::create_dir_all(&path).expect("Failed to create source directory");
        git(&path, &["init", "--quiet", "--initial-branch=main"]);
        SourceRepo { path }
    }

    /// Writes the manifest file.
    pub fn with_manifest(&self, content: &str) -> &Self {
        self.temp_dir
            .child("repofetch-manifest.yaml")
            .write_str(content)
            .expect("Failed to write manifest");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A file or directory inside the fixture.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.path().join("repofetch-lock.yaml")
    }

    #[allow(dead_code)]
    pub fn read_lock(&self) -> String {
        fs::read_to_string(self.lock_path()).expect("Failed to read lock")
    }

    /// Path of an installed checkout under the default base directory.
    #[allow(dead_code)]
    pub fn installed(&self, directory: &str) -> PathBuf {
        self.path().join("repos").join(directory)
    }

    /// The `repofetch` binary, run inside the fixture with colors off.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("repofetch");
        cmd.current_dir(self.path())
            .env_remove("REPOFETCH_MANIFEST")
            .env_remove("REPOFETCH_LOCK")
            .env_remove("REPOFETCH_BASE_DIR")
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
