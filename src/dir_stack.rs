//! # Working Directory Stack
//!
//! `pushd`/`popd` for the process working directory. The install and update
//! steps run external commands "inside" a repository, which means switching
//! the process's current directory and switching it back afterwards no
//! matter how the command ended.
//!
//! ## Guarantees
//!
//! - [`DirStack::enter_and_save`] records the directory that was current
//!   *before* the switch and only pushes it once the switch succeeded.
//! - [`DirStack::restore`] pops the most recent entry and switches back to
//!   it. A popped entry is consumed even when switching back fails.
//! - [`DirStack::enter`] and [`DirStack::within`] pair every successful
//!   enter with exactly one restore, including on early return and panic.
//!
//! The working directory belongs to the whole process, so every `DirStack`
//! also serializes its directory changes through one process-wide lock.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use log::{debug, warn};

use crate::error::{Error, Result};

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// A stack of working directories to return to.
#[derive(Debug, Default)]
pub struct DirStack {
    entries: Mutex<Vec<PathBuf>>,
}

impl DirStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved directories not yet restored.
    pub fn depth(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Saves the current directory and switches to `dir`.
    ///
    /// Nothing is pushed if either the current directory cannot be
    /// determined or `dir` cannot be entered.
    pub fn enter_and_save(&self, dir: &Path) -> Result<()> {
        let mut entries = self.lock_entries()?;
        let _cwd = lock_cwd()?;

        let previous = env::current_dir().map_err(|e| Error::Directory {
            path: dir.to_path_buf(),
            message: format!("unable to determine current directory: {}", e),
        })?;
        env::set_current_dir(dir).map_err(|e| Error::Directory {
            path: dir.to_path_buf(),
            message: format!("unable to enter directory: {}", e),
        })?;

        debug!("pushd {} (from {})", dir.display(), previous.display());
        entries.push(previous);
        Ok(())
    }

    /// Switches back to the most recently saved directory.
    ///
    /// Restoring an empty stack is a no-op.
    pub fn restore(&self) -> Result<()> {
        let mut entries = self.lock_entries()?;
        let Some(previous) = entries.pop() else {
            return Ok(());
        };
        let _cwd = lock_cwd()?;

        env::set_current_dir(&previous).map_err(|e| Error::Directory {
            path: previous.clone(),
            message: format!("unable to restore directory: {}", e),
        })?;
        debug!("popd {}", previous.display());
        Ok(())
    }

    /// Enters `dir` and returns a guard that restores the previous
    /// directory when it is consumed or dropped.
    pub fn enter(&self, dir: &Path) -> Result<DirGuard<'_>> {
        self.enter_and_save(dir)?;
        Ok(DirGuard {
            stack: self,
            active: true,
        })
    }

    /// Runs `operation` with `dir` as the working directory.
    ///
    /// The previous directory is always restored. If both the operation and
    /// the restore fail, the operation's error is returned and the restore
    /// failure is logged.
    pub fn within<T, F>(&self, dir: &Path, operation: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let guard = self.enter(dir)?;
        let result = operation();
        let restored = guard.restore();

        match (result, restored) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(restore_err)) => {
                warn!("{}", restore_err);
                Err(e)
            }
        }
    }

    fn lock_entries(&self) -> Result<MutexGuard<'_, Vec<PathBuf>>> {
        self.entries.lock().map_err(|_| Error::LockPoisoned {
            context: "directory stack".to_string(),
        })
    }
}

fn lock_cwd() -> Result<MutexGuard<'static, ()>> {
    CWD_LOCK.lock().map_err(|_| Error::LockPoisoned {
        context: "working directory".to_string(),
    })
}

/// Restores the directory saved by [`DirStack::enter`].
#[must_use = "dropping the guard restores the previous directory immediately"]
#[derive(Debug)]
pub struct DirGuard<'a> {
    stack: &'a DirStack,
    active: bool,
}

impl DirGuard<'_> {
    /// Restores the previous directory, reporting any failure.
    pub fn restore(mut self) -> Result<()> {
        self.active = false;
        self.stack.restore()
    }
}

impl Drop for DirGuard<'_> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.stack.restore() {
                warn!("{}", e);
            }
        }
    }
}
