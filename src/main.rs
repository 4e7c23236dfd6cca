//! reconflow - sequential reconnaissance pipeline.
//!
//! Usage:
//!   reconflow <INPUT> [-s] [-h] [-n] [-p] [-e] [-c] [-o]
//!   reconflow --clean | --compare

mod cli;
mod config;
mod constants;
mod core;
mod state;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::args::Args;
use config::Config;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    init_logging();

    let args = Args::parse();
    let plan = match cli::commands::plan(&args) {
        Ok(plan) => plan,
        Err(code) => return Ok(code),
    };

    let (config, source) = Config::load()?;
    tracing::debug!(
        %source,
        output_dir = %config.output_dir.display(),
        proxy = config.proxy.enabled,
        "configuration loaded"
    );

    cli::commands::execute(&plan, &config)
}

/// Logs to stderr so stdout carries only command results. `RUST_LOG` wins
/// over the `info` default.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
