use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use url::Url;

use crate::dir_stack::DirStack;
use crate::error::{Error, Result};
use crate::process::{display_command, Captured, CommandOutput, CommandRunner};

/// Clone a repository into `target_dir`
///
/// The target directory (including parents) is created first; git accepts an
/// existing empty directory as the clone destination.
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Personal access tokens
/// - Any authentication configured in ~/.gitconfig
pub fn clone(runner: &dyn CommandRunner, git: &str, url: &Url, target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir).map_err(|e| Error::Fetch {
        url: url.to_string(),
        operation: "clone".to_string(),
        message: format!("error creating {}: {}", target_dir.display(), e),
        output: String::new(),
    })?;

    let args = [OsStr::new("clone"), OsStr::new(url.as_str()), target_dir.as_os_str()];
    info!("Cloning {} into {}...", url, target_dir.display());
    let output = run(runner, git, &args, url, "clone")?;
    debug!("{}", Captured(&output.output));
    info!("Done cloning {}.", url);
    Ok(())
}

/// Pull the latest changes into an existing working copy at `target_dir`
///
/// The pull runs with `target_dir` as the working directory; the previous
/// directory is restored whether or not git succeeds. A directory without
/// its own `.git` is refused, since git would otherwise pull whichever
/// repository encloses it.
pub fn pull(
    runner: &dyn CommandRunner,
    dirs: &DirStack,
    git: &str,
    url: &Url,
    target_dir: &Path,
) -> Result<()> {
    if !target_dir.join(".git").exists() {
        warn!("{} exists but is not a git working copy", target_dir.display());
        return Err(Error::Fetch {
            url: url.to_string(),
            operation: "pull".to_string(),
            message: format!(
                "{} is not a git working copy; remove it or move it aside",
                target_dir.display()
            ),
            output: String::new(),
        });
    }

    info!("Updating {} in {}...", url, target_dir.display());
    let output = dirs.within(target_dir, || {
        run(runner, git, &[OsStr::new("pull")], url, "pull")
    })?;
    debug!("{}", Captured(&output.output));
    info!("Done updating {}.", url);
    Ok(())
}

fn run(
    runner: &dyn CommandRunner,
    git: &str,
    args: &[&OsStr],
    url: &Url,
    operation: &str,
) -> Result<CommandOutput> {
    debug!("running {}", display_command(git, args));
    let output = runner.run(git, args).map_err(|e| Error::Fetch {
        url: url.to_string(),
        operation: operation.to_string(),
        message: format!("unable to run {}: {}", git, e),
        output: String::new(),
    })?;

    if !output.success {
        return Err(Error::Fetch {
            url: url.to_string(),
            operation: operation.to_string(),
            message: failure_message(&output),
            output: output.output,
        });
    }
    Ok(output)
}

/// Provide a helpful message for common auth failures
fn failure_message(output: &CommandOutput) -> String {
    let status = output.status_message();
    if output.output.contains("Authentication failed")
        || output.output.contains("Permission denied")
        || output.output.contains("Could not read from remote repository")
    {
        format!(
            "{}; authentication failed. Make sure you have access to the repository \
             (SSH key in ssh-agent, git credentials or a personal access token)",
            status
        )
    } else {
        status
    }
}
