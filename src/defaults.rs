//! Default values for micro-installer configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Directory (relative to the current directory) that receives fetched
/// repositories when `--output-dir` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "src";

/// Base URL for identifiers listed under `github:`.
pub const GITHUB_BASE_URL: &str = "https://github.com";

/// Base URL for identifiers listed under `bitbucket:`.
pub const BITBUCKET_BASE_URL: &str = "https://bitbucket.org";

/// Version-control client used for clone and pull.
pub const GIT_PROGRAM: &str = "git";

/// Build command run inside every fetched repository.
pub const INSTALL_COMMAND: [&str; 2] = ["make", "install"];

/// Returns the default output directory.
///
/// This can be overridden by the `--output-dir` CLI flag or the
/// `MICRO_INSTALLER_OUTPUT_DIR` environment variable.
pub fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

/// Returns the default install command as owned strings.
pub fn default_install_command() -> Vec<String> {
    INSTALL_COMMAND.iter().map(|s| s.to_string()).collect()
}
