//! Recording stand-in for [`ToolRunner`] used by pipeline tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;

use super::runner::{ToolOutput, ToolRunner};
use super::tools::{Capture, Invocation, Tool};

pub struct MockRunner {
    outputs: HashMap<Tool, (bool, String)>,
    unspawnable: HashSet<Tool>,
    calls: RefCell<Vec<Invocation>>,
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            outputs: HashMap::new(),
            unspawnable: HashSet::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Canned successful output for a tool.
    pub fn with_output(mut self, tool: Tool, stdout: &str) -> Self {
        self.outputs.insert(tool, (true, stdout.to_string()));
        self
    }

    /// Canned non-zero exit, still producing the given output.
    pub fn failing(mut self, tool: Tool, stdout: &str) -> Self {
        self.outputs.insert(tool, (false, stdout.to_string()));
        self
    }

    /// The tool cannot be started at all.
    pub fn unspawnable(mut self, tool: Tool) -> Self {
        self.unspawnable.insert(tool);
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn called_tools(&self) -> Vec<Tool> {
        self.calls.borrow().iter().map(|c| c.tool).collect()
    }
}

impl ToolRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<ToolOutput> {
        self.calls.borrow_mut().push(invocation.clone());

        if self.unspawnable.contains(&invocation.tool) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "not found"));
        }

        let (success, text) = self
            .outputs
            .get(&invocation.tool)
            .cloned()
            .unwrap_or((true, String::new()));

        let stdout = match &invocation.capture {
            Capture::Stdout => text.into_bytes(),
            Capture::File(path) => {
                std::fs::write(path, text)?;
                Vec::new()
            }
        };

        Ok(ToolOutput {
            success,
            code: Some(i32::from(!success)),
            stdout,
            stderr: Vec::new(),
        })
    }
}
