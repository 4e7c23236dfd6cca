//! External tool catalogue.
//!
//! Each tool is an opaque binary. This module only knows how to build its
//! command line and where its results land; it never looks at the output.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::ProxyConfig;
use crate::state::Stage;

/// Every external tool the pipeline can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Subfinder,
    Assetfinder,
    Sublist3r,
    Findomain,
    Chaos,
    Httpx,
    Nuclei,
    Naabu,
    Katana,
    Waybackurls,
}

/// Where a tool's results end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// Results are written to stdout.
    Stdout,
    /// Results are written to the given file, which the pipeline then drains.
    File(PathBuf),
}

/// Inputs available when building a command line.
#[derive(Debug, Clone)]
pub struct ToolContext<'a> {
    /// Single domain, for per-domain tools.
    pub domain: &'a str,
    /// Newline-delimited targets, for list-driven tools.
    pub targets: &'a Path,
    /// Nuclei templates directory.
    pub templates: &'a Path,
    /// Scratch file for tools that only write to a file.
    pub scratch: &'a Path,
}

/// A fully built command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: Tool,
    pub program: OsString,
    pub args: Vec<OsString>,
    /// File piped to stdin, if any.
    pub stdin: Option<PathBuf>,
    pub capture: Capture,
}

impl Invocation {
    /// Prefixes the command with the proxy-chaining binary.
    #[must_use]
    pub fn proxied(mut self, proxy: &ProxyConfig) -> Self {
        let mut args: Vec<OsString> = proxy.args.iter().map(OsString::from).collect();
        args.push(std::mem::replace(&mut self.program, OsString::from(&proxy.binary)));
        args.append(&mut self.args);
        self.args = args;
        self
    }

    /// Shell-like rendering for logs.
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.to_string_lossy().into_owned()];
        parts.extend(self.args.iter().map(|a| a.to_string_lossy().into_owned()));
        let mut line = parts.join(" ");
        if let Some(stdin) = &self.stdin {
            line.push_str(&format!(" < {}", stdin.display()));
        }
        line
    }
}

impl Tool {
    /// Binary name looked up on `PATH`.
    #[must_use]
    pub const fn binary(self) -> &'static str {
        match self {
            Self::Subfinder => "subfinder",
            Self::Assetfinder => "assetfinder",
            Self::Sublist3r => "sublist3r",
            Self::Findomain => "findomain",
            Self::Chaos => "chaos",
            Self::Httpx => "httpx",
            Self::Nuclei => "nuclei",
            Self::Naabu => "naabu",
            Self::Katana => "katana",
            Self::Waybackurls => "waybackurls",
        }
    }

    /// Tools run for a stage, in invocation order.
    #[must_use]
    pub const fn for_stage(stage: Stage) -> &'static [Tool] {
        match stage {
            Stage::Subdomains => &[
                Self::Subfinder,
                Self::Assetfinder,
                Self::Sublist3r,
                Self::Findomain,
                Self::Chaos,
            ],
            Stage::LiveHosts => &[Self::Httpx],
            Stage::Nuclei => &[Self::Nuclei],
            Stage::Ports => &[Self::Naabu],
            Stage::Endpoints => &[Self::Katana, Self::Waybackurls],
        }
    }

    /// Builds the command line for this tool.
    pub fn invocation(self, ctx: &ToolContext<'_>) -> Invocation {
        let domain = OsString::from(ctx.domain);
        let targets = ctx.targets.as_os_str().to_os_string();

        let (args, stdin, capture): (Vec<OsString>, Option<PathBuf>, Capture) = match self {
            Self::Subfinder => (
                vec!["-d".into(), domain, "-silent".into()],
                None,
                Capture::Stdout,
            ),
            Self::Assetfinder => (vec!["--subs-only".into(), domain], None, Capture::Stdout),
            Self::Sublist3r => (
                vec![
                    "-d".into(),
                    domain,
                    "-o".into(),
                    ctx.scratch.as_os_str().to_os_string(),
                ],
                None,
                Capture::File(ctx.scratch.to_path_buf()),
            ),
            Self::Findomain => (
                vec!["-t".into(), domain, "-q".into()],
                None,
                Capture::Stdout,
            ),
            Self::Chaos => (
                vec!["-d".into(), domain, "-silent".into()],
                None,
                Capture::Stdout,
            ),
            Self::Httpx => (
                vec!["-l".into(), targets, "-silent".into()],
                None,
                Capture::Stdout,
            ),
            Self::Nuclei => (
                vec![
                    "-l".into(),
                    targets,
                    "-t".into(),
                    ctx.templates.as_os_str().to_os_string(),
                    "-silent".into(),
                ],
                None,
                Capture::Stdout,
            ),
            Self::Naabu | Self::Katana => (
                vec!["-list".into(), targets, "-silent".into()],
                None,
                Capture::Stdout,
            ),
            Self::Waybackurls => (Vec::new(), Some(ctx.targets.to_path_buf()), Capture::Stdout),
        };

        Invocation {
            tool: self,
            program: OsString::from(self.binary()),
            args,
            stdin,
            capture,
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.binary())
    }
}

/// Looks a tool up on `PATH`, returning the first executable match.
pub fn locate(binary: &str) -> Option<PathBuf> {
    locate_in(binary, &std::env::var_os("PATH")?)
}

fn locate_in(binary: &str, search_path: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(binary))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
