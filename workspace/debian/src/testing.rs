use std::{cell::RefCell, collections::HashMap};

use crate::execute::{CommandRunner, ExecuteError, Invocation};

/// Records every invocation instead of running it. `output` answers with
/// the canned stdout registered for the program name, or an empty string.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    invocations: RefCell<Vec<Invocation>>,
    outputs: HashMap<String, String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, program: &str, stdout: &str) -> Self {
        self.outputs.insert(program.to_string(), stdout.to_string());
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Invocations rendered as command lines, handy for assertions.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|invocation| invocation.to_string())
            .collect()
    }

    pub fn ran(&self, program: &str) -> bool {
        self.invocations
            .borrow()
            .iter()
            .any(|invocation| invocation.program_name() == program)
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ExecuteError> {
        self.invocations.borrow_mut().push(invocation.clone());
        Ok(())
    }

    fn output(&self, invocation: &Invocation) -> Result<String, ExecuteError> {
        self.invocations.borrow_mut().push(invocation.clone());
        Ok(self
            .outputs
            .get(invocation.program_name())
            .cloned()
            .unwrap_or_default())
    }
}
