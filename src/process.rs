//! External command execution.
//!
//! The pipeline only needs one capability from the outside world: run a
//! program in the current working directory, wait for it, and hand back its
//! exit status with everything it printed. [`CommandRunner`] is that seam;
//! [`ProcessRunner`] implements it with `std::process::Command`, and tests
//! swap in a recording mock.
//!
//! The system `git` picks up SSH keys, credential helpers and anything else
//! configured in `~/.gitconfig`, so no authentication is handled here.

use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::process::Command;

/// What an external command left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally
    pub status_code: Option<i32>,
    /// Whether the process reported success
    pub success: bool,
    /// stdout followed by stderr, decoded lossily
    pub output: String,
}

impl CommandOutput {
    /// A successful run that printed `output`.
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            status_code: Some(0),
            success: true,
            output: output.into(),
        }
    }

    /// A run that exited with `code` after printing `output`.
    pub fn failed(code: i32, output: impl Into<String>) -> Self {
        Self {
            status_code: Some(code),
            success: false,
            output: output.into(),
        }
    }

    /// Describes how the command ended, e.g. `exit status 128`.
    pub fn status_message(&self) -> String {
        match self.status_code {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external programs in the process's current working directory.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, blocking until it exits.
    ///
    /// Only a failure to start the program is an `Err`; a non-zero exit is
    /// reported through [`CommandOutput::success`].
    fn run(&self, program: &str, args: &[&OsStr]) -> io::Result<CommandOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[&OsStr]) -> io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput {
            status_code: output.status.code(),
            success: output.status.success(),
            output: combined,
        })
    }
}

/// Renders a command line for log and error messages.
pub fn display_command(program: &str, args: &[&OsStr]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Display adapter for a command's captured output in log lines.
pub struct Captured<'a>(pub &'a str);

impl fmt::Display for Captured<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trimmed = self.0.trim_end();
        if trimmed.is_empty() {
            f.write_str("(no output)")
        } else {
            f.write_str(trimmed)
        }
    }
}
