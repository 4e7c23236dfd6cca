//! Resolves the positional input into a list of bare hostnames.

use std::fs;
use std::path::{Path, PathBuf};

use url::Url;

use crate::constants;

/// What the positional argument refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A single domain or URL.
    Single(String),
    /// A file with one domain per line.
    List(PathBuf),
}

/// Classifies the raw input: an existing regular file is a domain list,
/// anything else a single target.
pub fn classify(input: &str) -> InputKind {
    let input = input.trim();
    let path = Path::new(input);
    if path.is_file() {
        InputKind::List(path.to_path_buf())
    } else {
        InputKind::Single(input.to_string())
    }
}

/// Resolves the raw input into deduplicated hostnames, keeping first-seen order.
pub fn resolve(input: &str) -> Result<Vec<String>, String> {
    let raw = match classify(input) {
        InputKind::Single(target) => vec![target],
        InputKind::List(path) => read_list(&path)?,
    };

    let mut hosts: Vec<String> = Vec::with_capacity(raw.len());
    for entry in raw {
        let host = normalize(&entry)?;
        if !hosts.contains(&host) {
            hosts.push(host);
        }
    }
    Ok(hosts)
}

/// Reads a domain list, skipping blanks and `#` comments.
fn read_list(path: &Path) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;

    let entries: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect();

    if entries.is_empty() {
        return Err(format!("{}{}", constants::ERR_EMPTY_LIST, path.display()));
    }
    Ok(entries)
}

/// Reduces a URL or domain to a lowercase host without a trailing dot.
pub fn normalize(target: &str) -> Result<String, String> {
    let target = target.trim();

    let host = if target.contains("://") {
        let url = Url::parse(target)
            .map_err(|e| format!("{}{target} ({e})", constants::ERR_INVALID_TARGET))?;
        url.host_str()
            .ok_or_else(|| format!("{}{target}", constants::ERR_INVALID_TARGET))?
            .to_string()
    } else {
        // Scheme-less input: drop any path, query, or port.
        target
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .split(':')
            .next()
            .unwrap_or_default()
            .to_string()
    };

    let host = host.trim_end_matches('.').to_lowercase();
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(format!("{}{target}", constants::ERR_INVALID_TARGET));
    }
    Ok(host)
}
