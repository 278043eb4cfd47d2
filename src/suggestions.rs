//! # Error Suggestions
//!
//! Helpers for error messages that say what went wrong AND how to fix it.
//!
//! ```rust,ignore
//! // Instead of:
//! anyhow::bail!("Repositories file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

use crate::source::Host;

/// Top-level keys accepted in a repositories file.
pub const CONFIG_KEYS: [&str; 3] = ["github", "bitbucket", "repos"];

/// Generate an error for when the repositories file is not found.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Repositories file not found: {path}\n\n\
         hint: Use -f/--file to point at a repositories.yml file\n\
         hint: Set the MICRO_INSTALLER_CONFIG environment variable\n\
         hint: Or list repositories directly with --github, --bitbucket or --repo",
        path = path.display()
    )
}

/// Hint printed after the usage text when nothing resolved to a target.
pub fn no_targets() -> String {
    let hosts: Vec<&str> = Host::ALL.iter().map(|h| h.name()).collect();
    format!(
        "No repositories to install.\n\n\
         hint: Pass a repositories file with -f/--file, or use --{} \"owner/name ...\"\n\
         hint: Known hosts: {}; other hosts take full URLs via --repo",
        Host::Github.name(),
        hosts.join(", ")
    )
}

/// Suggest the closest known configuration key for a misspelled one.
pub fn similar_config_key(key: &str) -> Option<&'static str> {
    find_similar(key, &CONFIG_KEYS)
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, a_char) in a_chars.iter().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }
    previous[b_chars.len()]
}
