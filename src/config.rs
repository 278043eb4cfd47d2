//! # Repositories Configuration
//!
//! This module defines the structure of the repositories file and the
//! normalization step that turns it into an ordered list of [`Source`]s.
//!
//! ## Format
//!
//! ```yaml
//! github:
//!   - tomogoma/imagems
//! bitbucket:
//!   - tomogoma/test
//! repos:
//!   - https://gitlab.com/group/project.git
//! ```
//!
//! Every key is optional. Identifiers under `github` and `bitbucket` are
//! `owner/name` paths resolved against that host's base URL; entries under
//! `repos` are full repository URLs.
//!
//! ## Normalization
//!
//! [`Config::normalize`] trims every entry, discards blanks and drops
//! duplicates within a partition while keeping the first occurrence, so the
//! resulting order is deterministic: github entries, then bitbucket, then
//! full URLs, each in the order they were first listed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::source::{Host, Source};
use crate::suggestions;

/// Raw repository identifiers, partitioned by host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// `owner/name` identifiers hosted on github.com
    #[serde(default)]
    pub github: Vec<String>,
    /// `owner/name` identifiers hosted on bitbucket.org
    #[serde(default)]
    pub bitbucket: Vec<String>,
    /// Full repository URLs on any host
    #[serde(default)]
    pub repos: Vec<String>,
}

impl Config {
    /// Returns the identifiers listed for a host.
    pub fn identifiers(&self, host: Host) -> &[String] {
        match host {
            Host::Github => &self.github,
            Host::Bitbucket => &self.bitbucket,
        }
    }

    /// Appends identifiers for a host, e.g. from a command-line override.
    pub fn extend_host<I, S>(&mut self, host: Host, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = match host {
            Host::Github => &mut self.github,
            Host::Bitbucket => &mut self.bitbucket,
        };
        list.extend(identifiers.into_iter().map(Into::into));
    }

    /// Appends full repository URLs.
    pub fn extend_repos<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.repos.extend(urls.into_iter().map(Into::into));
    }

    /// Returns `true` if no partition lists anything, blank or not.
    pub fn is_empty(&self) -> bool {
        self.github.is_empty() && self.bitbucket.is_empty() && self.repos.is_empty()
    }

    /// Resolves the configuration into fetch targets.
    ///
    /// Blank entries are dropped and entries resolving to the same target
    /// directory collapse to their first occurrence, so `a/b`, `a/b/` and
    /// `a/b.git` are one target. An empty result is not an error: callers
    /// decide what "nothing to do" means for them.
    pub fn normalize(&self) -> Result<Vec<Source>> {
        let mut seen = HashSet::new();
        let mut sources = Vec::new();

        for host in Host::ALL {
            let base_url = host.base_url();
            for identifier in non_blank(self.identifiers(host)) {
                validate_identifier(host, identifier)?;
                push_unique(&mut seen, &mut sources, Source::new(base_url.clone(), identifier));
            }
        }

        for url in non_blank(&self.repos) {
            let source = Source::from_url(url).map_err(|e| Error::Config {
                message: format!("invalid repository URL '{}': {}", url, e),
                hint: Some("Entries under 'repos:' must be full URLs, e.g. https://host/owner/name".to_string()),
            })?;
            push_unique(&mut seen, &mut sources, source);
        }

        Ok(sources)
    }
}

/// Trimmed entries, blanks skipped.
fn non_blank(entries: &[String]) -> impl Iterator<Item = &str> {
    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
}

/// Keeps `source` unless an earlier one resolves to the same directory.
fn push_unique(seen: &mut HashSet<PathBuf>, sources: &mut Vec<Source>, source: Source) {
    if seen.insert(source.target_dir(Path::new(""))) {
        sources.push(source);
    }
}

fn validate_identifier(host: Host, identifier: &str) -> Result<()> {
    let escapes = identifier
        .split('/')
        .any(|segment| segment == ".." || segment == ".");
    if escapes || identifier.trim_matches('/').is_empty() {
        return Err(Error::Config {
            message: format!("invalid {} identifier '{}'", host, identifier),
            hint: Some(format!("Use the owner/name form, e.g. {}: [owner/name]", host)),
        });
    }
    Ok(())
}

/// Parses a repositories configuration from a YAML string.
///
/// An empty document is treated as an empty configuration.
pub fn parse(yaml: &str) -> Result<Config> {
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str::<Option<Config>>(yaml)
        .map(Option::unwrap_or_default)
        .map_err(|e| {
            let message = e.to_string();
            let hint = unknown_key(&message)
                .and_then(suggestions::similar_config_key)
                .map(|key| format!("Did you mean '{}'?", key))
                .unwrap_or_else(|| {
                    "Expected top-level 'github', 'bitbucket' or 'repos' lists".to_string()
                });
            Error::Config {
                message,
                hint: Some(hint),
            }
        })
}

/// Extracts the key from serde's "unknown field `key`" message.
fn unknown_key(message: &str) -> Option<&str> {
    let rest = message.split("unknown field `").nth(1)?;
    rest.split('`').next()
}

/// Reads and parses a repositories configuration file.
pub fn from_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("unable to read {}: {}", path.display(), e),
        hint: None,
    })?;
    parse(&content)
}
