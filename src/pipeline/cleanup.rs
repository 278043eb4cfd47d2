//! Cleanup stage: remove or keep a fetched working copy.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};

/// What cleanup did with a target directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The keep-flag was set; the directory was left in place.
    Retained,
    /// The directory was deleted.
    Removed,
    /// There was nothing to delete.
    Absent,
}

/// Remove `target_dir` recursively unless `keep` is set.
///
/// Errors are meant to be logged by the caller, not to fail the target.
pub fn execute(target_dir: &Path, keep: bool) -> Result<CleanupOutcome> {
    if keep {
        info!("Keeping sources at {}", target_dir.display());
        return Ok(CleanupOutcome::Retained);
    }
    if !target_dir.exists() {
        return Ok(CleanupOutcome::Absent);
    }

    fs::remove_dir_all(target_dir).map_err(|e| Error::Cleanup {
        path: target_dir.to_path_buf(),
        message: e.to_string(),
    })?;
    info!("Removed sources at {}", target_dir.display());
    Ok(CleanupOutcome::Removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_removes_directory_when_not_kept() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("github.com/a/b");
        fs::create_dir_all(target.join("src")).unwrap();
        fs::write(target.join("src/main.go"), "package main").unwrap();

        assert_eq!(execute(&target, false).unwrap(), CleanupOutcome::Removed);
        assert!(!target.exists());
    }

    #[test]
    fn test_keeps_directory_when_flag_set() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("repo");
        fs::create_dir_all(&target).unwrap();

        assert_eq!(execute(&target, true).unwrap(), CleanupOutcome::Retained);
        assert!(target.exists());
    }

    #[test]
    fn test_missing_directory_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("never-cloned");

        assert_eq!(execute(&target, false).unwrap(), CleanupOutcome::Absent);
    }

    #[cfg(unix)]
    #[test]
    fn test_target_that_is_not_a_directory_is_cleanup_error() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("repo");
        fs::write(&target, "not a working copy").unwrap();

        let err = execute(&target, false).unwrap_err();
        assert!(matches!(err, Error::Cleanup { ref path, .. } if *path == target));
        assert!(target.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_removal_failure_is_cleanup_error() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let parent = temp_dir.path().join("locked");
        let target = parent.join("repo");
        fs::create_dir_all(target.join("inner")).unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o555)).unwrap();

        let result = execute(&target, false);
        if target.exists() {
            fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).unwrap();
        }

        // Root ignores directory permissions, so only assert when removal was refused.
        if let Err(err) = result {
            assert!(matches!(err, Error::Cleanup { .. }));
            assert!(target.exists());
        }
    }
}
