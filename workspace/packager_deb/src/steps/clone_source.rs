use debian::execute::CommandRunner;
use types::git_remote::GitRemote;

use crate::{
    configs::pkg_config::PkgConfig,
    error::PackagingError,
    misc::build_pipeline::BuildStep,
    source,
    source_package::SourcePackage,
};

#[derive(Default)]
pub struct CloneSource {
    git_url: Option<GitRemote>,
}

impl From<&PkgConfig> for CloneSource {
    fn from(config: &PkgConfig) -> Self {
        CloneSource {
            git_url: config.source.git_url.clone(),
        }
    }
}

impl BuildStep for CloneSource {
    fn name(&self) -> &'static str {
        "clone source"
    }

    fn step(
        &self,
        package: &mut SourcePackage,
        runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError> {
        let url = self.git_url.as_ref().ok_or_else(|| {
            PackagingError::MissingGitUrl(
                package.identity().name().unwrap_or_default().to_string(),
            )
        })?;
        source::clone_source(package, url, runner)
    }
}
