//! Shared state types: stages, artifacts, selections and run summaries.

mod operation;
mod summary;

pub use operation::{Artifact, Selection, Stage};
pub use summary::{RunSummary, StageReport, ToolOutcome};
