//! Fetch stage: clone a new target or update an existing one.
//!
//! The target directory is the only state consulted. If it exists the
//! repository was fetched by an earlier run (or by hand) and is updated in
//! place; otherwise it is cloned fresh.

use std::path::Path;

use crate::dir_stack::DirStack;
use crate::error::Result;
use crate::git;
use crate::process::CommandRunner;
use crate::source::Source;

/// Which of the two fetch operations was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The repository was cloned into a new directory.
    Cloned,
    /// An existing working copy was pulled in place.
    Updated,
}

impl FetchOutcome {
    /// Whether the working copy existed before this run. Such copies are
    /// never deleted by cleanup.
    pub fn pre_existing(self) -> bool {
        matches!(self, FetchOutcome::Updated)
    }
}

/// Clone or update `source` into `target_dir`.
pub fn execute(
    source: &Source,
    target_dir: &Path,
    git_program: &str,
    runner: &dyn CommandRunner,
    dirs: &DirStack,
) -> Result<FetchOutcome> {
    let url = source.fetch_url();
    if target_dir.exists() {
        git::pull(runner, dirs, git_program, &url, target_dir)?;
        Ok(FetchOutcome::Updated)
    } else {
        git::clone(runner, git_program, &url, target_dir)?;
        Ok(FetchOutcome::Cloned)
    }
}
