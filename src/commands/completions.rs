//! Shell completion scripts for `micro-installer`.
//!
//! ```bash
//! micro-installer completions bash > ~/.local/share/bash-completion/completions/micro-installer
//! micro-installer completions zsh > ~/.zfunc/_micro-installer
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate the script for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<ExitCode> {
    let mut stdout = io::stdout().lock();
    write_script(args.shell, &mut stdout)?;
    Ok(ExitCode::SUCCESS)
}

fn write_script(shell: Shell, out: &mut dyn Write) -> io::Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_mentions_subcommands() {
        let mut buffer = Vec::new();
        write_script(Shell::Bash, &mut buffer).unwrap();

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("micro-installer"));
        assert!(script.contains("install"));
        assert!(script.contains("--keep-src"));
    }
}
