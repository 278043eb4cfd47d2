//! # micro-installer
//!
//! This library fetches source repositories from remote git hosts and runs
//! each repository's own install procedure. It backs the `micro-installer`
//! command-line tool but can be driven directly.
//!
//! ## Quick Example
//!
//! ```
//! use micro_installer::config;
//!
//! let config = config::parse(r#"
//! github:
//!   - tomogoma/imagems
//!   - ""
//!   - tomogoma/imagems
//! bitbucket:
//!   - tomogoma/test
//! "#).unwrap();
//!
//! let sources = config.normalize().unwrap();
//! assert_eq!(sources.len(), 2);
//! assert_eq!(sources[0].fetch_url().as_str(), "https://github.com/tomogoma/imagems");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: `owner/name` identifiers per host plus full
//!   repository URLs, normalized into an ordered, duplicate-free list of
//!   sources.
//! - **Sources (`source`)**: a base URL plus repository path, from which the
//!   clone URL and the local target directory are derived.
//! - **Directory stack (`dir_stack`)**: scoped `pushd`/`popd` so commands run
//!   inside a repository without leaving the process somewhere else.
//! - **Pipeline (`pipeline`)**: fetch (clone or pull), install, then clean up,
//!   one target at a time, continuing past failures.
//!
//! ## Execution Flow
//!
//! For each source the pipeline:
//!
//! 1.  **Fetches**: clones into `output/<host>/<owner>/<name>`, or pulls if
//!     that directory already exists.
//! 2.  **Installs**: runs `make install` inside the working copy.
//! 3.  **Cleans up**: removes the working copy unless `--keep-src` was given
//!     or the copy existed before the run.

pub mod config;
pub mod defaults;
pub mod dir_stack;
pub mod error;
pub mod git;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod source;
pub mod suggestions;
