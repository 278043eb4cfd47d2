//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_config(configs::GITHUB_ONLY);
//! fixture.command().arg("ls").arg("-f").arg(fixture.config_path()).assert().success();
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::init_source_repo;
    pub use super::TestFixture;
}

/// Common repositories files for testing.
#[allow(dead_code)]
pub mod configs {
    /// Two github repositories with blank and duplicate noise.
    pub const GITHUB_ONLY: &str = r#"
github:
  - tomogoma/imagems
  - ""
  - tomogoma/imagems
  - tomogoma/authms
"#;

    /// One repository per partition.
    pub const ALL_HOSTS: &str = r#"
github:
  - tomogoma/imagems
bitbucket:
  - tomogoma/test
repos:
  - https://gitlab.com/group/project.git
"#;

    /// Only blank entries.
    pub const BLANK: &str = r#"
github:
  - ""
  - "   "
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "github: [unclosed";

    /// Unknown top-level key.
    pub const UNKNOWN_KEY: &str = "gitub:\n  - a/b\n";
}

/// A temporary directory with an optional `repositories.yml`.
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

    /// Add a `repositories.yml` with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.temp_dir
            .child("repositories.yml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Create a directory (and parents) inside the fixture.
    #[allow(dead_code)]
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("repositories.yml")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Create a command configured to run in this fixture's directory.
    ///
    /// Colors are off and `RUST_LOG` is cleared so output is predictable.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("micro-installer");
        cmd.current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("MICRO_INSTALLER_CONFIG")
            .env_remove("MICRO_INSTALLER_OUTPUT_DIR");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a local git repository whose `make install` touches `marker`.
///
/// Returns the `file://` URL to clone it from. Requires `git` and `make`.
#[allow(dead_code)]
pub fn init_source_repo(parent: &Path, name: &str, marker: &Path) -> url::Url {
    let repo = parent.join(name);
    std::fs::create_dir_all(&repo).expect("Failed to create source repo");
    std::fs::write(
        repo.join("Makefile"),
        format!("install:\n\ttouch {}\n", marker.display()),
    )
    .expect("Failed to write Makefile");

    git(&repo, &["init", "--quiet"]);
    git(&repo, &["add", "Makefile"]);
    git(
        &repo,
        &[
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "commit",
            "--quiet",
            "-m",
            "initial",
        ],
    );

    url::Url::from_file_path(&repo).expect("Failed to build file URL")
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed in {}", args, dir.display());
}
