//! The fetch, install and cleanup pipeline.
//!
//! ## Overview
//!
//! Every resolved [`Source`] goes through the same stages, strictly one
//! target at a time:
//!
//! 1. **Fetch** ([`fetch`]) - clone into a new target directory, or pull if
//!    the directory already exists
//! 2. **Install** ([`install`]) - run the install command inside the target
//! 3. **Cleanup** ([`cleanup`]) - delete the working copy unless it is kept
//!
//! Cleanup is scheduled before fetching starts and runs exactly once per
//! target, whichever stage failed. A working copy that existed before the
//! run is always kept.
//!
//! A failing target is logged and recorded in the [`RunReport`]; the
//! remaining targets are still processed.

use std::fmt;
use std::path::PathBuf;

use crate::defaults::{default_install_command, default_output_dir, GIT_PROGRAM};
use crate::error::Error;
use crate::source::Source;

pub mod cleanup;
pub mod fetch;
pub mod install;
pub mod runner;

pub use cleanup::CleanupOutcome;
pub use fetch::FetchOutcome;
pub use runner::Pipeline;

/// Settings shared by every target in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Parent directory of all fetched working copies
    pub output_dir: PathBuf,
    /// Keep freshly cloned working copies after install
    pub keep_source: bool,
    /// Version-control client used for clone and pull
    pub git_program: String,
    /// Install command: program followed by its arguments
    pub install_command: Vec<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            keep_source: false,
            git_program: GIT_PROGRAM.to_string(),
            install_command: default_install_command(),
        }
    }
}

/// Where a target is in its pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Resolved,
    Fetching,
    Installing,
    Done,
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetState::Resolved => "resolved",
            TargetState::Fetching => "fetching",
            TargetState::Installing => "installing",
            TargetState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of one target.
#[derive(Debug)]
pub struct TargetReport {
    pub source: Source,
    pub target_dir: PathBuf,
    /// `None` if fetching failed
    pub fetch: Option<FetchOutcome>,
    /// Whether the install command completed successfully
    pub installed: bool,
    /// `None` if cleanup failed (the failure is logged)
    pub cleanup: Option<CleanupOutcome>,
    /// The error that stopped this target, if any
    pub error: Option<Error>,
}

impl TargetReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a whole run, one entry per target in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub targets: Vec<TargetReport>,
}

impl RunReport {
    /// Targets that failed.
    pub fn failures(&self) -> impl Iterator<Item = &TargetReport> {
        self.targets.iter().filter(|t| !t.is_success())
    }

    /// Targets that were fetched and installed.
    pub fn successes(&self) -> impl Iterator<Item = &TargetReport> {
        self.targets.iter().filter(|t| t.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// `true` if every target succeeded.
    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}
