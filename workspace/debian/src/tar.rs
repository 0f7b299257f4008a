use std::path::{Path, PathBuf};

use crate::execute::{Execute, Invocation};

/// xz compressed tarball of one directory, `tar cJvf <archive> <directory>`.
#[derive(Debug, Clone)]
pub struct TarXz {
    archive: PathBuf,
    directory: PathBuf,
    workdir: Option<PathBuf>,
    verbose: bool,
}

impl TarXz {
    pub fn new(archive: impl AsRef<Path>, directory: impl AsRef<Path>) -> Self {
        Self {
            archive: archive.as_ref().to_path_buf(),
            directory: directory.as_ref().to_path_buf(),
            workdir: None,
            verbose: true,
        }
    }

    /// Directory both paths are relative to.
    pub fn workdir(mut self, dir: impl AsRef<Path>) -> Self {
        self.workdir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn quiet(mut self) -> Self {
        self.verbose = false;
        self
    }
}

impl Execute for TarXz {
    fn invocation(&self) -> Invocation {
        let flags = if self.verbose { "cJvf" } else { "cJf" };
        let invocation = Invocation::program("tar").args([
            flags.to_string(),
            self.archive.display().to_string(),
            self.directory.display().to_string(),
        ]);
        match &self.workdir {
            Some(dir) => invocation.current_dir(dir),
            None => invocation,
        }
    }
}
