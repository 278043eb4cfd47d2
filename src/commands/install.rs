//! # Install Command Implementation
//!
//! Fetches every configured repository and runs its install command.
//!
//! - Repositories already present under the output directory are pulled
//!   instead of cloned, and are never deleted afterwards.
//! - Freshly cloned repositories are deleted after installing unless
//!   `--keep-src` is given.
//! - A failing repository is reported and the next one is processed. The
//!   command still exits 0 once every repository has been attempted.
//! - With nothing to install, the usage is printed and the exit code is 1.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use micro_installer::output::OutputConfig;
use micro_installer::pipeline::{Pipeline, PipelineOptions, RunReport};

use super::TargetArgs;

/// Fetch repositories and run their installers
#[derive(Args, Debug)]
pub struct InstallArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Keep the fetched sources after installing them
    #[arg(long, alias = "keepSrc")]
    pub keep_src: bool,

    /// Suppress the summary; failures are still logged
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the `install` command.
pub fn execute(args: InstallArgs, output: &OutputConfig) -> Result<ExitCode> {
    let sources = args.targets.resolve()?;
    if sources.is_empty() {
        super::print_usage("install");
        return Ok(ExitCode::FAILURE);
    }

    let options = PipelineOptions {
        output_dir: args.targets.output_dir.clone(),
        keep_source: args.keep_src,
        ..Default::default()
    };
    let report = Pipeline::new(options).run(&sources);

    if !args.quiet {
        print_summary(&report, output);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(report: &RunReport, output: &OutputConfig) {
    println!();
    for target in &report.targets {
        match &target.error {
            None => println!("{} {}", output.ok_marker(), target.source),
            Some(e) => println!("{} {}: {}", output.failed_marker(), target.source, first_line(e)),
        }
    }
    println!(
        "Installed {} of {} repositories",
        report.targets.len() - report.failure_count(),
        report.targets.len()
    );
}

fn first_line(error: &micro_installer::error::Error) -> String {
    error
        .to_string()
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use micro_installer::error::Error;
    use std::path::PathBuf;

    #[test]
    fn test_execute_without_targets_fails_with_usage() {
        let args = InstallArgs {
            targets: TargetArgs {
                file: None,
                github: vec!["   ".to_string()],
                bitbucket: Vec::new(),
                repos: Vec::new(),
                output_dir: PathBuf::from("unused"),
            },
            keep_src: false,
            quiet: true,
        };

        let code = execute(args, &OutputConfig::from_env_and_flag("never")).unwrap();
        assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::FAILURE));
    }

    #[test]
    fn test_execute_invalid_identifier_is_error() {
        let args = InstallArgs {
            targets: TargetArgs {
                file: None,
                github: vec!["../escape".to_string()],
                bitbucket: Vec::new(),
                repos: Vec::new(),
                output_dir: PathBuf::from("unused"),
            },
            keep_src: false,
            quiet: true,
        };

        let err = execute(args, &OutputConfig::from_env_and_flag("never")).unwrap_err();
        assert!(err.to_string().contains("invalid github identifier"));
    }

    #[test]
    fn test_first_line() {
        let error = Error::Fetch {
            url: "https://github.com/a/b".to_string(),
            operation: "clone".to_string(),
            message: "exit status 128".to_string(),
            output: "fatal: not found".to_string(),
        };
        let line = first_line(&error);
        assert!(line.contains("exit status 128"));
        assert!(!line.contains("fatal: not found"));
    }
}
