//! Install stage: run the repository's install command inside it.

use std::ffi::OsStr;
use std::path::Path;

use log::{debug, info};

use crate::dir_stack::DirStack;
use crate::error::{Error, Result};
use crate::process::{display_command, Captured, CommandRunner};

/// Run `command` (program followed by arguments) with `target_dir` as the
/// working directory.
///
/// The previous working directory is restored whether the command succeeds,
/// fails or cannot be started.
pub fn execute(
    target_dir: &Path,
    command: &[String],
    runner: &dyn CommandRunner,
    dirs: &DirStack,
) -> Result<()> {
    let Some((program, args)) = command.split_first() else {
        return Err(Error::Install {
            dir: target_dir.to_path_buf(),
            command: String::new(),
            message: "no install command configured".to_string(),
            output: String::new(),
        });
    };
    let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
    let command_line = display_command(program, &args);

    info!("Installing {}...", target_dir.display());
    let output = dirs.within(target_dir, || {
        let output = runner.run(program, &args).map_err(|e| Error::Install {
            dir: target_dir.to_path_buf(),
            command: command_line.clone(),
            message: format!("unable to run {}: {}", program, e),
            output: String::new(),
        })?;
        if !output.success {
            return Err(Error::Install {
                dir: target_dir.to_path_buf(),
                command: command_line.clone(),
                message: output.status_message(),
                output: output.output,
            });
        }
        Ok(output)
    })?;

    debug!("{}", Captured(&output.output));
    info!("Done installing {}.", target_dir.display());
    Ok(())
}
