//! # Output Configuration
//!
//! Decides whether the CLI decorates its summary lines with emoji or plain
//! text markers.
//!
//! `--color=always|never` wins outright. With `auto`, in order:
//! `NO_COLOR` (any value) and `CLICOLOR=0` turn decoration off,
//! `CLICOLOR_FORCE` (non-empty, not `0`) turns it on, `TERM=dumb` turns it
//! off, and otherwise it follows whether stdout is a color terminal.

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and the `--color`
    /// flag value (`always`, `never` or `auto`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        Self::resolve(
            color_flag,
            |key| env::var_os(key).map(|v| v.to_string_lossy().into_owned()),
            || console::Term::stdout().features().colors_supported(),
        )
    }

    fn resolve<V, T>(color_flag: &str, var: V, terminal_colors: T) -> Self
    where
        V: Fn(&str) -> Option<String>,
        T: FnOnce() -> bool,
    {
        let use_color = match color_flag.to_ascii_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => {
                let is = |key: &str, value: &str| var(key).is_some_and(|v| v == value);
                if var("NO_COLOR").is_some() || is("CLICOLOR", "0") {
                    false
                } else if var("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
                    true
                } else {
                    !is("TERM", "dumb") && terminal_colors()
                }
            }
        };
        Self { use_color }
    }

    /// Marker for a target that was fetched and installed.
    pub fn ok_marker(&self) -> &'static str {
        emoji(self, "✅", "[OK]")
    }

    /// Marker for a target that failed.
    pub fn failed_marker(&self) -> &'static str {
        emoji(self, "❌", "[FAILED]")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn auto(vars: &[(&str, &str)], tty: bool) -> bool {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        OutputConfig::resolve("auto", |key| vars.get(key).cloned(), || tty).use_color
    }

    #[test]
    fn test_color_always() {
        let config = OutputConfig::from_env_and_flag("always");
        assert!(config.use_color);
        assert_eq!(config.ok_marker(), "✅");
    }

    #[test]
    fn test_color_never() {
        let config = OutputConfig::from_env_and_flag("never");
        assert!(!config.use_color);
        assert_eq!(config.ok_marker(), "[OK]");
        assert_eq!(config.failed_marker(), "[FAILED]");
    }

    #[test]
    fn test_color_flag_is_case_insensitive() {
        assert!(OutputConfig::from_env_and_flag("ALWAYS").use_color);
        assert!(!OutputConfig::from_env_and_flag("Never").use_color);
    }

    #[test]
    fn test_auto_follows_terminal() {
        assert!(auto(&[], true));
        assert!(!auto(&[], false));
    }

    #[test]
    fn test_auto_environment_overrides() {
        assert!(!auto(&[("NO_COLOR", "")], true));
        assert!(!auto(&[("CLICOLOR", "0")], true));
        assert!(!auto(&[("TERM", "dumb")], true));
        assert!(auto(&[("CLICOLOR_FORCE", "1")], false));
        assert!(!auto(&[("CLICOLOR_FORCE", "0")], false));
        assert!(!auto(&[("NO_COLOR", "1"), ("CLICOLOR_FORCE", "1")], true));
    }
}
