//! Application-wide constants and configuration values.
//!
//! This module defines the static values used throughout reconflow,
//! including file layout, tool defaults, environment variables, and
//! user-facing messages.

// === Application Metadata ===

/// Application name (from Cargo.toml).
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

// === Path Configuration ===

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// Scratch subdirectory inside the output directory.
pub const SCRATCH_DIR_NAME: &str = ".scratch";
/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Date format embedded in every artifact file name.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Extension shared by every artifact file.
pub const ARTIFACT_EXT: &str = "txt";

// === Environment Variables ===

/// Overrides the config file location.
pub const ENV_CONFIG: &str = "RECONFLOW_CONFIG";
/// Overrides the output directory.
pub const ENV_OUTPUT_DIR: &str = "RECONFLOW_OUTPUT_DIR";

// === Tool Defaults ===

/// Local nuclei templates checkout.
pub const DEFAULT_NUCLEI_TEMPLATES: &str = "~/nuclei-templates";
/// Proxy-chaining binary used when the proxy layer is enabled.
pub const DEFAULT_PROXY_BINARY: &str = "proxychains4";
/// Arguments passed to the proxy binary ahead of the wrapped tool.
pub const DEFAULT_PROXY_ARGS: [&str; 1] = ["-q"];

// === Messages: CLI Output ===

pub const MSG_NO_PREVIOUS: &str = "No previous subdomains file to compare.";
pub const MSG_NO_CURRENT: &str = "No current subdomains file to compare.";
pub const MSG_NO_NEW: &str = "No new subdomains found.";
pub const MSG_CLEANED: &str = "Output directory cleaned: ";
pub const MSG_MISSING_INPUT: &str = "Error: an input domain, URL, or domain list file is required.\n";
pub const CLI_MSG_ERROR: &str = "Error: ";
pub const MSG_NOT_ROOT: &str = "Not running as root, naabu will fall back to a CONNECT scan";
pub const MSG_MISSING_OPERATION: &str = "Error: select at least one operation.\n";

// === Error Messages ===

pub const ERR_EMPTY_LIST: &str = "No valid domains found in ";
pub const ERR_INVALID_TARGET: &str = "Invalid target: ";
