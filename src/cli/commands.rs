//! CLI command handlers.

use std::process::ExitCode;

use clap::CommandFactory;
use color_eyre::Result;

use super::args::Args;
use crate::config::Config;
use crate::constants;
use crate::core::diff::{self, CompareOutcome};
use crate::core::pipeline::Pipeline;
use crate::core::runner::SystemRunner;
use crate::core::target;
use crate::core::workspace::Workspace;
use crate::state::{RunSummary, Selection, Stage, ToolOutcome};

/// A validated command line: what to run and against which targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub selection: Selection,
    /// Resolved hosts; empty when no tool-backed stage is selected.
    pub domains: Vec<String>,
}

/// Checks the selection and resolves targets without touching the output
/// directory. On rejection the usage or error has already been printed and
/// the exit code to return is given back.
pub fn plan(args: &Args) -> std::result::Result<Plan, ExitCode> {
    let selection = args.selection();

    if selection.is_empty() {
        let message = if args.input.is_some() {
            constants::MSG_MISSING_OPERATION
        } else {
            constants::MSG_MISSING_INPUT
        };
        print_usage(message);
        return Err(ExitCode::FAILURE);
    }

    let mut domains = Vec::new();
    if selection.has_stages() {
        let Some(input) = args.input.as_deref() else {
            print_usage(constants::MSG_MISSING_INPUT);
            return Err(ExitCode::FAILURE);
        };
        domains = target::resolve(input).map_err(|e| {
            eprintln!("{}{e}", constants::CLI_MSG_ERROR);
            ExitCode::FAILURE
        })?;
    }

    Ok(Plan { selection, domains })
}

/// Runs clean, then the selected stages, then compare.
///
/// # Errors
///
/// Returns an error when the output directory cannot be read or written.
pub fn execute(plan: &Plan, config: &Config) -> Result<ExitCode> {
    let selection = &plan.selection;
    let workspace = Workspace::today(&config.output_dir);

    if selection.clean {
        clean(&workspace)?;
    }

    if selection.has_stages() {
        scan(&workspace, config, &selection.stages(), &plan.domains)?;
    }

    if selection.compare {
        compare(&workspace)?;
    }

    Ok(ExitCode::SUCCESS)
}

fn print_usage(message: &str) {
    eprintln!("{message}");
    eprintln!("{}", Args::command().render_help());
}

fn clean(workspace: &Workspace) -> Result<()> {
    let removed = workspace.clean()?;
    tracing::info!(removed, "output directory cleaned");
    println!("{}{}", constants::MSG_CLEANED, workspace.root().display());
    Ok(())
}

fn scan(workspace: &Workspace, config: &Config, stages: &[Stage], domains: &[String]) -> Result<()> {
    tracing::info!(
        targets = domains.len(),
        date = %workspace.date(),
        output = %workspace.root().display(),
        "starting recon"
    );
    let runner = SystemRunner;
    let summary = Pipeline::new(&runner, workspace, config).run(stages, domains)?;
    log_summary(&summary);
    Ok(())
}

fn compare(workspace: &Workspace) -> Result<()> {
    match diff::compare(workspace)? {
        CompareOutcome::NoPrevious => println!("{}", constants::MSG_NO_PREVIOUS),
        CompareOutcome::NoCurrent => println!("{}", constants::MSG_NO_CURRENT),
        CompareOutcome::New(lines) if lines.is_empty() => println!("{}", constants::MSG_NO_NEW),
        CompareOutcome::New(lines) => {
            tracing::info!(count = lines.len(), "new subdomains found");
            for line in lines {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn log_summary(summary: &RunSummary) {
    for stage in Stage::ALL {
        let Some(report) = summary.stage(stage) else {
            continue;
        };
        tracing::info!(
            stage = %report.stage,
            lines = report.lines,
            succeeded = report.count(ToolOutcome::Succeeded),
            failed = report.count(ToolOutcome::Failed) + report.count(ToolOutcome::SpawnFailed),
            skipped = report.count(ToolOutcome::Skipped),
            "{}",
            report.artifact.display()
        );
    }
}
