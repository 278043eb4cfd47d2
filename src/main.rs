//! # Micro Installer CLI
//!
//! Binary entry point for the `micro-installer` command-line tool: parses
//! arguments with `clap`, runs the selected command and turns its outcome
//! into an exit code.
//!
//! The fetch and install logic lives in the `micro_installer` library; this
//! binary is a thin wrapper around it.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli.execute()
}
