//! # CLI Command Implementations
//!
//! Each subcommand of `micro-installer` lives in its own file with an
//! `Args` struct derived with `clap` and an `execute` function that calls
//! into the `micro_installer` library.
//!
//! The arguments that pick the repositories (`--file`, `--github`,
//! `--bitbucket`, `--repo`, `--output-dir`) are shared by `install` and `ls`
//! through [`TargetArgs`].

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, CommandFactory};

use micro_installer::config::{self, Config};
use micro_installer::defaults::DEFAULT_OUTPUT_DIR;
use micro_installer::source::{Host, Source};
use micro_installer::suggestions;

use crate::cli::Cli;

pub mod completions;
pub mod install;
pub mod ls;

/// Where to find the repositories and where to put them
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Repositories file with `github`, `bitbucket` and `repos` lists
    #[arg(short, long, value_name = "FILE", env = "MICRO_INSTALLER_CONFIG")]
    pub file: Option<PathBuf>,

    /// github.com owner/name identifiers separated by spaces,
    /// e.g. "tomogoma/micro-installer tomogoma/imagems"
    #[arg(long, value_name = "IDS")]
    pub github: Vec<String>,

    /// bitbucket.org owner/name identifiers separated by spaces,
    /// e.g. "tomogoma/test tomogoma/test2"
    #[arg(long, value_name = "IDS")]
    pub bitbucket: Vec<String>,

    /// Full URL of a repository on any git host (repeatable)
    #[arg(long = "repo", value_name = "URL")]
    pub repos: Vec<String>,

    /// Parent directory for fetched repositories
    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        env = "MICRO_INSTALLER_OUTPUT_DIR"
    )]
    pub output_dir: PathBuf,
}

impl TargetArgs {
    /// Loads the repositories file (if any) and appends the command-line
    /// identifiers to it.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.file {
            Some(path) if !path.exists() => return Err(suggestions::config_not_found(path)),
            Some(path) => config::from_file(path)?,
            None => Config::default(),
        };

        config.extend_host(Host::Github, split_identifiers(&self.github));
        config.extend_host(Host::Bitbucket, split_identifiers(&self.bitbucket));
        config.extend_repos(self.repos.iter().cloned());
        Ok(config)
    }

    /// Resolves every configured repository into a fetch target.
    pub fn resolve(&self) -> Result<Vec<Source>> {
        Ok(self.load_config()?.normalize()?)
    }
}

/// Splits space-separated identifier lists given on the command line.
fn split_identifiers(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split_whitespace())
        .map(str::to_string)
        .collect()
}

/// Prints the usage of `subcommand` and a hint to stderr.
pub fn print_usage(subcommand: &str) {
    let mut cmd = Cli::command();
    cmd.build();
    if let Some(sub) = cmd.find_subcommand_mut(subcommand) {
        eprintln!("{}", sub.render_help());
    }
    eprintln!("{}", suggestions::no_targets());
}
