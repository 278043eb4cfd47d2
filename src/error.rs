//! # Error Handling
//!
//! This module defines the centralized error type for `micro-installer`. It
//! uses `thiserror` to derive a single `Error` enum whose variants line up
//! with the stages of the install pipeline.
//!
//! ## Propagation
//!
//! - **`Config`** aborts the whole run: without valid targets there is
//!   nothing to do.
//! - **`Directory`**, **`Fetch`** and **`Install`** abort only the target
//!   being processed. The pipeline runner logs them and moves on.
//! - **`Cleanup`** never fails a target. A leftover directory is logged and
//!   otherwise ignored.
//!
//! `Fetch` and `Install` carry the combined stdout/stderr of the external
//! command so the failure can be diagnosed from the log alone.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for micro-installer operations
#[derive(Error, Debug)]
pub enum Error {
    /// The repositories configuration could not be read or is invalid.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    Config {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// The working directory could not be saved, entered or restored.
    #[error("Directory error at {}: {message}", path.display())]
    Directory { path: PathBuf, message: String },

    /// Cloning or updating a repository failed.
    #[error("Fetch error for {url} ({operation}): {message}{}", format_output(output))]
    Fetch {
        url: String,
        /// The version-control operation that failed (`clone` or `pull`)
        operation: String,
        message: String,
        /// Combined stdout and stderr of the command, if it ran
        output: String,
    },

    /// The repository's install command failed.
    #[error("Install error in {} ({command}): {message}{}", dir.display(), format_output(output))]
    Install {
        dir: PathBuf,
        command: String,
        message: String,
        /// Combined stdout and stderr of the command, if it ran
        output: String,
    },

    /// A fetched working copy could not be removed.
    #[error("Cleanup error for {}: {message}", path.display())]
    Cleanup { path: PathBuf, message: String },

    /// A mutex guarding shared state has been poisoned.
    #[error("Lock poisoned: {context}")]
    LockPoisoned { context: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n  output:\n{}", trimmed)
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
