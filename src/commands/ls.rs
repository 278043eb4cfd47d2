//! # Ls Command Implementation
//!
//! Lists the repositories an `install` with the same arguments would
//! process: what it would do (`clone` or `update`), the fetch URL and the
//! local directory. Nothing is fetched or written.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use super::TargetArgs;

/// List the repositories that would be fetched
#[derive(Args, Debug)]
pub struct LsArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Show only the number of repositories
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<ExitCode> {
    let sources = args.targets.resolve()?;
    if sources.is_empty() {
        super::print_usage("ls");
        return Ok(ExitCode::FAILURE);
    }

    if args.count {
        println!("{}", sources.len());
        return Ok(ExitCode::SUCCESS);
    }

    for source in &sources {
        let target_dir = source.target_dir(&args.targets.output_dir);
        let action = if target_dir.exists() { "update" } else { "clone" };
        println!("{:<6}  {}  {}", action, source, target_dir.display());
    }
    Ok(ExitCode::SUCCESS)
}
