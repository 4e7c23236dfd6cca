//! Straight-line stage sequencing.
//!
//! Stages run in the fixed order of [`Stage::ALL`], each tool blocking until it
//! exits. Tool failures are logged and skipped; only local filesystem errors
//! stop a run.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use super::runner::ToolRunner;
use super::tools::{self, Capture, Tool, ToolContext};
use super::workspace::Workspace;
use crate::config::Config;
use crate::constants;
use crate::state::{Artifact, RunSummary, Stage, StageReport, ToolOutcome};
use crate::utils;

const TARGETS_FILE_NAME: &str = "targets.txt";

/// Drives the selected stages against a set of targets.
pub struct Pipeline<'a, R: ToolRunner> {
    runner: &'a R,
    workspace: &'a Workspace,
    config: &'a Config,
    preflight: bool,
    on_path: RefCell<HashMap<&'static str, bool>>,
}

impl<'a, R: ToolRunner> Pipeline<'a, R> {
    pub fn new(runner: &'a R, workspace: &'a Workspace, config: &'a Config) -> Self {
        Self {
            runner,
            workspace,
            config,
            preflight: true,
            on_path: RefCell::new(HashMap::new()),
        }
    }

    /// Skips the `PATH` lookup and hands every tool straight to the runner.
    #[must_use]
    pub fn without_preflight(mut self) -> Self {
        self.preflight = false;
        self
    }

    /// Runs `stages` (already in execution order) for `domains`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the output directory or its files cannot be
    /// written.
    pub fn run(&self, stages: &[Stage], domains: &[String]) -> Result<RunSummary> {
        self.workspace.ensure()?;
        let scratch = self.workspace.scratch_dir();
        fs::create_dir_all(&scratch)
            .wrap_err_with(|| format!("Failed to create {}", scratch.display()))?;

        let result = self.run_stages(stages, domains, &scratch);

        if let Err(e) = fs::remove_dir_all(&scratch) {
            tracing::debug!(error = %e, "failed to remove scratch directory");
        }
        result
    }

    fn run_stages(
        &self,
        stages: &[Stage],
        domains: &[String],
        scratch: &Path,
    ) -> Result<RunSummary> {
        let input_targets = scratch.join(TARGETS_FILE_NAME);
        let mut listing = domains.join("\n");
        listing.push('\n');
        fs::write(&input_targets, listing)
            .wrap_err_with(|| format!("Failed to write {}", input_targets.display()))?;

        if let Some(notice) = root_notice(stages, utils::is_root()) {
            tracing::info!("{notice}");
        }

        let mut summary = RunSummary::default();
        for &stage in stages {
            tracing::info!(%stage, "stage started");
            let report = if stage == Stage::Subdomains {
                self.run_per_domain(stage, domains, &input_targets)?
            } else {
                self.run_on_list(stage, domains, &input_targets)?
            };
            tracing::info!(
                %stage,
                lines = report.lines,
                artifact = %report.artifact.display(),
                "stage finished"
            );
            summary.stages.push(report);
        }
        Ok(summary)
    }

    /// Runs every stage tool once per domain.
    fn run_per_domain(
        &self,
        stage: Stage,
        domains: &[String],
        input_targets: &Path,
    ) -> Result<StageReport> {
        let artifact = stage.artifact();
        self.workspace.append(artifact, b"")?;

        let templates = self.config.templates_path();
        let mut outcomes = Vec::new();
        for domain in domains {
            for &tool in Tool::for_stage(stage) {
                let scratch = self.scratch_file(tool);
                let ctx = ToolContext {
                    domain,
                    targets: input_targets,
                    templates: &templates,
                    scratch: &scratch,
                };
                tracing::info!(%tool, %domain, "running");
                outcomes.push((tool.binary(), self.invoke(tool, &ctx, artifact)?));
            }
        }

        self.finish(stage, outcomes)
    }

    /// Runs every stage tool once against the best available targets file.
    fn run_on_list(
        &self,
        stage: Stage,
        domains: &[String],
        input_targets: &Path,
    ) -> Result<StageReport> {
        let artifact = stage.artifact();
        self.workspace.append(artifact, b"")?;

        let targets = self.targets_for(stage, input_targets);
        let templates = self.config.templates_path();
        tracing::debug!(%stage, targets = %targets.display(), "selected targets");

        let mut outcomes = Vec::new();
        for &tool in Tool::for_stage(stage) {
            let scratch = self.scratch_file(tool);
            let ctx = ToolContext {
                // List-driven tools ignore the domain.
                domain: domains.first().map_or("", String::as_str),
                targets: &targets,
                templates: &templates,
                scratch: &scratch,
            };
            tracing::info!(%tool, "running");
            outcomes.push((tool.binary(), self.invoke(tool, &ctx, artifact)?));
        }

        self.finish(stage, outcomes)
    }

    fn finish(
        &self,
        stage: Stage,
        tools: Vec<(&'static str, ToolOutcome)>,
    ) -> Result<StageReport> {
        let artifact = stage.artifact();
        if stage.dedupes() {
            self.workspace.sort_unique(artifact)?;
        }
        Ok(StageReport {
            stage,
            artifact: self.workspace.path(artifact),
            lines: self.workspace.line_count(artifact),
            tools,
        })
    }

    /// Today's live hosts, then today's subdomains, then the raw input.
    fn targets_for(&self, stage: Stage, input_targets: &Path) -> PathBuf {
        let preferred: &[Artifact] = match stage {
            Stage::Subdomains => &[],
            Stage::LiveHosts => &[Artifact::Subdomains],
            Stage::Nuclei | Stage::Ports | Stage::Endpoints => {
                &[Artifact::LiveSubdomains, Artifact::Subdomains]
            }
        };
        preferred
            .iter()
            .find(|&&artifact| self.workspace.has_content(artifact))
            .map_or_else(|| input_targets.to_path_buf(), |&a| self.workspace.path(a))
    }

    fn scratch_file(&self, tool: Tool) -> PathBuf {
        self.workspace
            .scratch_dir()
            .join(format!("{}.txt", tool.binary()))
    }

    fn invoke(&self, tool: Tool, ctx: &ToolContext<'_>, artifact: Artifact) -> Result<ToolOutcome> {
        let binary = tool.binary();
        if self.config.is_disabled(binary) {
            tracing::debug!(%tool, "disabled by config");
            return Ok(ToolOutcome::Skipped);
        }
        if !self.is_available(binary) {
            tracing::warn!(%tool, "not found on PATH, skipping");
            return Ok(ToolOutcome::Skipped);
        }

        let mut invocation = tool.invocation(ctx);
        if let Capture::File(path) = &invocation.capture {
            let _ = fs::remove_file(path);
        }
        if self.config.proxy.enabled {
            invocation = invocation.proxied(&self.config.proxy);
        }
        tracing::debug!(command = %invocation.display(), "invoking");

        let output = match self.runner.run(&invocation) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(%tool, error = %e, "failed to start");
                return Ok(ToolOutcome::SpawnFailed);
            }
        };

        let results = match &invocation.capture {
            Capture::Stdout => output.stdout,
            Capture::File(path) => fs::read(path).unwrap_or_default(),
        };
        self.workspace.append(artifact, &results)?;

        if output.success {
            Ok(ToolOutcome::Succeeded)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(%tool, code = ?output.code, "exited with failure, continuing");
            tracing::debug!(%tool, stderr = %stderr.trim(), "tool stderr");
            Ok(ToolOutcome::Failed)
        }
    }

    fn is_available(&self, binary: &'static str) -> bool {
        if !self.preflight {
            return true;
        }
        *self.on_path.borrow_mut().entry(binary).or_insert_with(|| {
            let found = tools::locate(binary);
            tracing::debug!(%binary, path = ?found, "preflight");
            found.is_some()
        })
    }
}

/// Naabu falls back to a CONNECT scan without root.
fn root_notice(stages: &[Stage], is_root: bool) -> Option<&'static str> {
    (stages.contains(&Stage::Ports) && !is_root).then_some(constants::MSG_NOT_ROOT)
}
