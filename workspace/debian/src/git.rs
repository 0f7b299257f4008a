use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::execute::{CommandRunner, Execute, ExecuteError, Invocation};

#[derive(Debug, Error)]
pub enum GitError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("Unexpected output from git rev-list: '{0}'")]
    InvalidRevisionCount(String),
}

/// `git clone <remote> <destination>`
#[derive(Debug, Clone)]
pub struct GitClone {
    remote: String,
    destination: PathBuf,
    workdir: Option<PathBuf>,
}

impl GitClone {
    pub fn new(remote: impl Into<String>, destination: impl AsRef<Path>) -> Self {
        Self {
            remote: remote.into(),
            destination: destination.as_ref().to_path_buf(),
            workdir: None,
        }
    }

    /// Directory `destination` is relative to.
    pub fn workdir(mut self, dir: impl AsRef<Path>) -> Self {
        self.workdir = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl Execute for GitClone {
    fn invocation(&self) -> Invocation {
        let invocation = Invocation::program("git").args([
            "clone".to_string(),
            self.remote.clone(),
            self.destination.display().to_string(),
        ]);
        match &self.workdir {
            Some(dir) => invocation.current_dir(dir),
            None => invocation,
        }
    }
}

/// Number of commits reachable from any ref of a repository.
#[derive(Debug, Clone)]
pub struct GitRevisionCount {
    repository: PathBuf,
}

impl GitRevisionCount {
    pub fn new(repository: impl AsRef<Path>) -> Self {
        Self {
            repository: repository.as_ref().to_path_buf(),
        }
    }

    pub fn count(&self, runner: &dyn CommandRunner) -> Result<u64, GitError> {
        let output = runner.output(&self.invocation())?;
        let count = parse_revision_count(&output)?;
        info!(
            "{} has {} revisions",
            self.repository.display(),
            count
        );
        Ok(count)
    }
}

impl Execute for GitRevisionCount {
    fn invocation(&self) -> Invocation {
        Invocation::program("git")
            .args(["rev-list", "--all", "--count"])
            .current_dir(&self.repository)
    }
}

pub fn parse_revision_count(output: &str) -> Result<u64, GitError> {
    let trimmed = output.trim();
    trimmed
        .parse::<u64>()
        .map_err(|_| GitError::InvalidRevisionCount(trimmed.to_string()))
}
