use std::{io, path::PathBuf};

use debian::{dpkg_architecture::ArchitectureError, execute::ExecuteError, git::GitError};
use thiserror::Error;
use types::identity::ConfigurationError;

#[derive(Debug, Error)]
pub enum PackagingError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Can't find license file in {0}")]
    LicenseNotFound(PathBuf),

    #[error("install phase is not configured, configure a build system first")]
    InstallPhaseNotConfigured,

    #[error("{0} does not exist, initialize the control file first")]
    ControlNotInitialized(PathBuf),

    #[error("No git_url configured for {0}")]
    MissingGitUrl(String),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Architecture(#[from] ArchitectureError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    IoError(#[from] io::Error),
}
