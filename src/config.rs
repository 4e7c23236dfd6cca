//! User configuration loaded from `config.toml`.
//!
//! Every key is optional. A missing file means defaults; a file that exists
//! but does not parse is a hard error so typos never silently fall back.

use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use serde::Deserialize;

use crate::constants;
use crate::utils;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the dated artifact files.
    pub output_dir: PathBuf,
    /// Local nuclei templates checkout (`~/` is expanded).
    pub nuclei_templates: String,
    /// Optional proxy-chaining layer.
    pub proxy: ProxyConfig,
    /// Tool selection overrides.
    pub tools: ToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            nuclei_templates: constants::DEFAULT_NUCLEI_TEMPLATES.to_string(),
            proxy: ProxyConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

/// Proxy-chaining settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProxyConfig {
    pub enabled: bool,
    pub binary: String,
    pub args: Vec<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            binary: constants::DEFAULT_PROXY_BINARY.to_string(),
            args: constants::DEFAULT_PROXY_ARGS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Binaries that are never invoked, e.g. `["sublist3r"]`.
    pub disabled: Vec<String>,
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Defaults => write!(f, "defaults"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Config {
    /// Loads the configuration from `RECONFLOW_CONFIG` or the default config
    /// directory, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<(Self, ConfigSource)> {
        let path = std::env::var_os(constants::ENV_CONFIG)
            .map(PathBuf::from)
            .or_else(default_config_path);

        let (mut config, source) = match path {
            Some(path) if path.is_file() => (Self::from_file(&path)?, ConfigSource::File(path)),
            _ => (Self::default(), ConfigSource::Defaults),
        };

        if let Some(dir) = std::env::var_os(constants::ENV_OUTPUT_DIR) {
            if !dir.is_empty() {
                config.output_dir = PathBuf::from(dir);
            }
        }

        Ok((config, source))
    }

    /// Parses a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid config TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&raw).wrap_err_with(|| format!("Invalid config file {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Nuclei templates path with `~/` expanded.
    pub fn templates_path(&self) -> PathBuf {
        utils::expand_home(&self.nuclei_templates)
    }

    /// Whether a tool binary is disabled by config.
    pub fn is_disabled(&self, binary: &str) -> bool {
        self.tools.disabled.iter().any(|d| d == binary)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(constants::APP_NAME)
            .join(constants::CONFIG_FILE_NAME)
    })
}
