//! Run summary types.

use std::path::PathBuf;

use super::Stage;

/// Outcome of a single external tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Exited zero.
    Succeeded,
    /// Exited non-zero (or was killed by a signal).
    Failed,
    /// Could not be spawned at all.
    SpawnFailed,
    /// Not found on `PATH` or disabled by config.
    Skipped,
}

/// Per-stage report.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub artifact: PathBuf,
    pub lines: usize,
    pub tools: Vec<(&'static str, ToolOutcome)>,
}

impl StageReport {
    #[must_use]
    pub fn count(&self, outcome: ToolOutcome) -> usize {
        self.tools.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub stages: Vec<StageReport>,
}

impl RunSummary {
    #[must_use]
    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|r| r.stage == stage)
    }
}
