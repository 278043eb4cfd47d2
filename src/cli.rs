//! CLI argument parsing and command dispatch

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use micro_installer::output::OutputConfig;

/// Micro Installer - Fetch repositories and run their installers
#[derive(Parser, Debug)]
#[command(name = "micro-installer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch repositories and run `make install` in each of them
    Install(commands::install::InstallArgs),

    /// List the repositories that would be fetched, and where
    Ls(commands::ls::LsArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        init_logging(&self.log_level);
        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Install(args) => commands::install::execute(args, &output),
            Commands::Ls(args) => commands::ls::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second initialisation (e.g. from tests) keeps the first logger.
    let _ = env_logger::Builder::from_env(env)
        .format_target(false)
        .try_init();
}
