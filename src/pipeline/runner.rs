//! Pipeline runner: sequences fetch, install and cleanup for every target.

use std::path::{self, Path, PathBuf};

use log::{debug, error, info, warn};

use super::cleanup::{self, CleanupOutcome};
use super::fetch::{self, FetchOutcome};
use super::install;
use super::{PipelineOptions, RunReport, TargetReport, TargetState};
use crate::dir_stack::DirStack;
use crate::error::Result;
use crate::process::{CommandRunner, ProcessRunner};
use crate::source::Source;

/// Runs the install pipeline over a list of sources.
///
/// The pipeline owns the [`DirStack`] used to enter repositories, so the
/// working directory is only ever changed through it.
pub struct Pipeline {
    options: PipelineOptions,
    runner: Box<dyn CommandRunner>,
    dirs: DirStack,
}

impl Pipeline {
    /// Creates a pipeline that runs real `git` and install processes.
    pub fn new(options: PipelineOptions) -> Self {
        Self::with_runner(options, Box::new(ProcessRunner))
    }

    /// Creates a pipeline with a custom command runner.
    pub fn with_runner(options: PipelineOptions, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            options,
            runner,
            dirs: DirStack::new(),
        }
    }

    /// Fetches, installs and cleans up every source in order.
    ///
    /// Never stops early: a failing target is logged and recorded, and the
    /// next target is processed.
    pub fn run(&self, sources: &[Source]) -> RunReport {
        let output_dir = self.resolved_output_dir();
        let mut report = RunReport::default();

        for source in sources {
            let target = self.run_target(source, &output_dir);
            if let Some(e) = &target.error {
                error!("error installing {}: {}", source, e);
            }
            report.targets.push(target);
        }

        info!(
            "Processed {} target(s), {} failed",
            report.targets.len(),
            report.failure_count()
        );
        report
    }

    fn run_target(&self, source: &Source, output_dir: &Path) -> TargetReport {
        let target_dir = source.target_dir(output_dir);
        transition(source, TargetState::Resolved);

        let existed = target_dir.exists();
        let mut scheduled = ScheduledCleanup::new(target_dir.clone(), self.options.keep_source || existed);
        let mut fetched = None;
        let mut installed = false;

        transition(source, TargetState::Fetching);
        let result = fetch::execute(
            source,
            &target_dir,
            &self.options.git_program,
            self.runner.as_ref(),
            &self.dirs,
        )
        .and_then(|outcome| {
            fetched = Some(outcome);
            if outcome.pre_existing() {
                scheduled.retain();
            }
            transition(source, TargetState::Installing);
            install::execute(
                &target_dir,
                &self.options.install_command,
                self.runner.as_ref(),
                &self.dirs,
            )?;
            installed = true;
            Ok(())
        });

        let cleanup = scheduled.run();
        transition(source, TargetState::Done);

        TargetReport {
            source: source.clone(),
            target_dir,
            fetch: fetched,
            installed,
            cleanup,
            error: result.err(),
        }
    }

    fn resolved_output_dir(&self) -> PathBuf {
        // Installs change the working directory, so relative targets are pinned first.
        match path::absolute(&self.options.output_dir) {
            Ok(dir) => dir,
            Err(e) => {
                warn!(
                    "unable to resolve {}: {}",
                    self.options.output_dir.display(),
                    e
                );
                self.options.output_dir.clone()
            }
        }
    }
}

fn transition(source: &Source, state: TargetState) {
    debug!("{}: {}", source, state);
}

/// Cleanup scheduled before fetching; runs exactly once, on `run` or on drop.
struct ScheduledCleanup {
    target_dir: PathBuf,
    keep: bool,
    done: bool,
}

impl ScheduledCleanup {
    fn new(target_dir: PathBuf, keep: bool) -> Self {
        Self {
            target_dir,
            keep,
            done: false,
        }
    }

    /// Force the working copy to be kept.
    fn retain(&mut self) {
        self.keep = true;
    }

    fn run(mut self) -> Option<CleanupOutcome> {
        self.done = true;
        run_cleanup(&self.target_dir, self.keep)
    }
}

impl Drop for ScheduledCleanup {
    fn drop(&mut self) {
        if !self.done {
            run_cleanup(&self.target_dir, self.keep);
        }
    }
}

fn run_cleanup(target_dir: &Path, keep: bool) -> Option<CleanupOutcome> {
    let result: Result<CleanupOutcome> = cleanup::execute(target_dir, keep);
    match result {
        Ok(outcome) => Some(outcome),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}
