//! # Fetch Sources
//!
//! A [`Source`] is a resolved fetch target: the base URL of a host plus the
//! repository path below it. Sources are produced by
//! [`Config::normalize`](crate::config::Config::normalize) and never built by
//! hand from user input.
//!
//! Two things are derived from a source:
//!
//! - the **fetch URL** handed to `git clone`, made by joining the base URL's
//!   path with the repository path;
//! - the **target directory**, `output_dir/<host>/<base path>/<repo path>`,
//!   which doubles as the key deciding between clone and update.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::defaults::{BITBUCKET_BASE_URL, GITHUB_BASE_URL};
use crate::error::{Error, Result};

/// Hosts that accept short `owner/name` identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    Github,
    Bitbucket,
}

impl Host {
    /// All known hosts, in the order their partitions are resolved.
    pub const ALL: [Host; 2] = [Host::Github, Host::Bitbucket];

    /// Name of the host as used in configuration files and CLI flags.
    pub fn name(self) -> &'static str {
        match self {
            Host::Github => "github",
            Host::Bitbucket => "bitbucket",
        }
    }

    /// The base URL that identifiers for this host are resolved against.
    pub fn base_url(self) -> Url {
        let raw = match self {
            Host::Github => GITHUB_BASE_URL,
            Host::Bitbucket => BITBUCKET_BASE_URL,
        };
        Url::parse(raw).expect("host base URLs are valid constants")
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A repository resolved to a base URL and a path below it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Source {
    base_url: Url,
    path: String,
}

impl Source {
    /// Creates a source from a host base URL and a repository path such as
    /// `owner/name`. Leading and trailing slashes on the path are ignored.
    pub fn new(base_url: Url, path: &str) -> Self {
        Self {
            base_url,
            path: path.trim_matches('/').to_string(),
        }
    }

    /// Splits a full repository URL into its origin and path.
    ///
    /// The URL must be absolute and name a repository path, e.g.
    /// `https://gitlab.com/group/project.git`.
    pub fn from_url(raw: &str) -> Result<Self> {
        let url = Url::parse(raw)?;
        if url.cannot_be_a_base() {
            return Err(Error::Config {
                message: format!("'{}' is not a repository URL", raw),
                hint: Some("Use a full URL such as https://host/owner/name".to_string()),
            });
        }
        let path = url.path().trim_matches('/').to_string();
        if path.is_empty() {
            return Err(Error::Config {
                message: format!("'{}' does not name a repository path", raw),
                hint: Some("Use a full URL such as https://host/owner/name".to_string()),
            });
        }

        let mut base_url = url.clone();
        base_url.set_path("/");
        base_url.set_query(None);
        base_url.set_fragment(None);
        Ok(Self { base_url, path })
    }

    /// The host base URL this source was resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The repository path below the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The repository name: the last path segment without a `.git` suffix.
    pub fn name(&self) -> &str {
        let last = self.path.rsplit('/').next().unwrap_or(&self.path);
        last.strip_suffix(".git").unwrap_or(last)
    }

    /// The URL passed to `git clone`.
    pub fn fetch_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}/{}", self.base_url.path().trim_end_matches('/'), self.path);
        url.set_path(&joined);
        url
    }

    /// The local directory this source is fetched into.
    pub fn target_dir(&self, output_dir: &Path) -> PathBuf {
        let host = match (self.base_url.host_str(), self.base_url.port()) {
            (Some(host), Some(port)) if !host.is_empty() => format!("{}_{}", host, port),
            (Some(host), None) if !host.is_empty() => host.to_string(),
            _ => "localhost".to_string(),
        };

        let mut dir = output_dir.join(host);
        for segment in self.base_url.path().split('/').filter(|s| !s.is_empty()) {
            dir.push(segment);
        }

        let mut segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        if let Some(last) = segments.pop() {
            for segment in segments {
                dir.push(segment);
            }
            dir.push(last.strip_suffix(".git").unwrap_or(last));
        }
        dir
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fetch_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_base_urls() {
        assert_eq!(Host::Github.base_url().as_str(), "https://github.com/");
        assert_eq!(Host::Bitbucket.base_url().as_str(), "https://bitbucket.org/");
        assert_eq!(Host::Github.to_string(), "github");
    }

    #[test]
    fn test_fetch_url_joins_base_and_path() {
        let source = Source::new(Host::Github.base_url(), "tomogoma/imagems");
        assert_eq!(
            source.fetch_url().as_str(),
            "https://github.com/tomogoma/imagems"
        );
        assert_eq!(source.to_string(), "https://github.com/tomogoma/imagems");
    }

    #[test]
    fn test_fetch_url_keeps_base_path() {
        let base = Url::parse("https://git.example.com/mirrors/").unwrap();
        let source = Source::new(base, "/owner/name/");
        assert_eq!(source.path(), "owner/name");
        assert_eq!(
            source.fetch_url().as_str(),
            "https://git.example.com/mirrors/owner/name"
        );
    }

    #[test]
    fn test_target_dir_layout() {
        let source = Source::new(Host::Bitbucket.base_url(), "tomogoma/test");
        assert_eq!(
            source.target_dir(Path::new("src")),
            PathBuf::from("src/bitbucket.org/tomogoma/test")
        );
    }

    #[test]
    fn test_target_dir_strips_git_suffix() {
        let source = Source::from_url("https://gitlab.com/group/sub/project.git").unwrap();
        assert_eq!(source.name(), "project");
        assert_eq!(
            source.target_dir(Path::new("/out")),
            PathBuf::from("/out/gitlab.com/group/sub/project")
        );
        assert_eq!(
            source.fetch_url().as_str(),
            "https://gitlab.com/group/sub/project.git"
        );
    }

    #[test]
    fn test_target_dir_with_port_and_file_urls() {
        let source = Source::from_url("http://localhost:8080/a/b").unwrap();
        assert_eq!(
            source.target_dir(Path::new("out")),
            PathBuf::from("out/localhost_8080/a/b")
        );

        let source = Source::from_url("file:///tmp/repos/lib").unwrap();
        assert_eq!(source.fetch_url().as_str(), "file:///tmp/repos/lib");
        assert_eq!(
            source.target_dir(Path::new("out")),
            PathBuf::from("out/localhost/tmp/repos/lib")
        );
    }

    #[test]
    fn test_from_url_drops_query_and_fragment() {
        let source = Source::from_url("https://example.com/a/b?x=1#frag").unwrap();
        assert_eq!(source.base_url().as_str(), "https://example.com/");
        assert_eq!(source.path(), "a/b");
    }

    #[test]
    fn test_from_url_rejects_invalid_urls() {
        assert!(matches!(
            Source::from_url("owner/name"),
            Err(Error::UrlParse(_))
        ));
        assert!(matches!(
            Source::from_url("mailto:someone@example.com"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            Source::from_url("https://example.com/"),
            Err(Error::Config { .. })
        ));
    }
}
