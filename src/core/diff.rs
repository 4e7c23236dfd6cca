//! Compares today's subdomains against the most recent prior run.

use std::collections::{BTreeSet, HashSet};
use std::fs;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use super::workspace::Workspace;
use crate::state::Artifact;

/// Result of the compare operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareOutcome {
    /// No subdomains file dated before today.
    NoPrevious,
    /// Today's subdomains file does not exist.
    NoCurrent,
    /// Lines in today's file that the prior file lacks, sorted.
    New(Vec<String>),
}

/// Lines of `current` absent from `prior`, sorted and deduplicated.
pub fn new_lines(current: &str, prior: &str) -> Vec<String> {
    let seen: HashSet<&str> = prior.lines().map(str::trim).collect();
    current
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !seen.contains(line))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Diffs today's subdomains against the latest prior file and records the new
/// ones in today's `new_subdomains` artifact.
pub fn compare(workspace: &Workspace) -> Result<CompareOutcome> {
    let Some(prior_path) = workspace.latest_prior(Artifact::Subdomains) else {
        return Ok(CompareOutcome::NoPrevious);
    };
    let current_path = workspace.path(Artifact::Subdomains);
    if !current_path.is_file() {
        return Ok(CompareOutcome::NoCurrent);
    }

    let prior = fs::read_to_string(&prior_path)
        .wrap_err_with(|| format!("Failed to read {}", prior_path.display()))?;
    let current = fs::read_to_string(&current_path)
        .wrap_err_with(|| format!("Failed to read {}", current_path.display()))?;

    tracing::info!(
        prior = %prior_path.display(),
        current = %current_path.display(),
        "comparing subdomains"
    );

    let fresh = new_lines(&current, &prior);
    workspace.ensure()?;
    workspace.write_lines(Artifact::NewSubdomains, &fresh)?;
    Ok(CompareOutcome::New(fresh))
}
