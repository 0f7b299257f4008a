use log::info;
use regex::Regex;
use thiserror::Error;

use crate::execute::{CommandRunner, Execute, ExecuteError, Invocation};

#[derive(Debug, Error)]
pub enum ArchitectureError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("dpkg-architecture did not report DEB_BUILD_ARCH")]
    BuildArchMissing,
}

/// Queries the native build architecture, e.g. `amd64`.
#[derive(Debug, Clone, Default)]
pub struct DpkgArchitecture;

impl DpkgArchitecture {
    pub fn new() -> Self {
        Self
    }

    pub fn build_arch(&self, runner: &dyn CommandRunner) -> Result<String, ArchitectureError> {
        let output = runner.output(&self.invocation())?;
        let arch = parse_build_arch(&output)?;
        info!("Build architecture: {}", arch);
        Ok(arch)
    }
}

impl Execute for DpkgArchitecture {
    fn invocation(&self) -> Invocation {
        Invocation::program("dpkg-architecture")
    }
}

/// Value after the last `=` on the `DEB_BUILD_ARCH=` line.
pub fn parse_build_arch(output: &str) -> Result<String, ArchitectureError> {
    let line = Regex::new(r"(?m)^DEB_BUILD_ARCH=.*$").expect("valid arch regex");
    let found = line
        .find(output)
        .ok_or(ArchitectureError::BuildArchMissing)?
        .as_str();
    let arch = found
        .rsplit_once('=')
        .map(|(_, value)| value.trim())
        .unwrap_or_default();
    if arch.is_empty() {
        return Err(ArchitectureError::BuildArchMissing);
    }
    Ok(arch.to_string())
}
