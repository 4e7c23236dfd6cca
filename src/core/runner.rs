//! Process execution for external tools.

use std::fs::File;
use std::io;
use std::process::{Command, Stdio};

use super::tools::Invocation;

/// Captured result of one tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    /// Exit code; `None` when killed by a signal.
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Runs an invocation to completion.
///
/// Only a failure to start the process is an error; a non-zero exit is
/// reported through [`ToolOutput::success`].
pub trait ToolRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput>;
}

/// Runs tools as child processes, blocking until each exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        let stdin = match &invocation.stdin {
            Some(path) => Stdio::from(File::open(path)?),
            None => Stdio::null(),
        };

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(ToolOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tools::{Capture, Tool};
    use std::ffi::OsString;
    use tempfile::TempDir;

    fn invocation(program: &str, args: &[&str]) -> Invocation {
        Invocation {
            tool: Tool::Httpx,
            program: OsString::from(program),
            args: args.iter().map(OsString::from).collect(),
            stdin: None,
            capture: Capture::Stdout,
        }
    }

    #[test]
    fn test_system_runner_captures_stdout() {
        let out = SystemRunner
            .run(&invocation("sh", &["-c", "printf 'a.example.com\\n'"]))
            .unwrap();
        assert!(out.success);
        assert_eq!(out.code, Some(0));
        assert_eq!(out.stdout, b"a.example.com\n");
    }

    #[test]
    fn test_system_runner_reports_nonzero_exit() {
        let out = SystemRunner
            .run(&invocation("sh", &["-c", "echo partial; exit 3"]))
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stdout, b"partial\n");
    }

    #[test]
    fn test_system_runner_missing_binary_is_error() {
        let result = SystemRunner.run(&invocation("definitely-not-a-real-binary-xyz", &[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_system_runner_pipes_stdin_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("targets.txt");
        std::fs::write(&path, "example.com\n").unwrap();

        let mut inv = invocation("cat", &[]);
        inv.stdin = Some(path.clone());
        let out = SystemRunner.run(&inv).unwrap();
        assert_eq!(out.stdout, b"example.com\n");
    }
}
