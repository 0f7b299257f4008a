use debian::execute::CommandRunner;

use crate::{
    configs::pkg_config::PkgConfig,
    error::PackagingError,
    misc::build_pipeline::BuildStep,
    source_package::SourcePackage,
};

#[derive(Default)]
pub struct ResolveVersion {
    version: String,
    revision: String,
    git_count: bool,
}

impl From<&PkgConfig> for ResolveVersion {
    fn from(config: &PkgConfig) -> Self {
        ResolveVersion {
            version: config.package.version.clone(),
            revision: config.package.revision.clone(),
            git_count: config.package.git_count,
        }
    }
}

impl BuildStep for ResolveVersion {
    fn name(&self) -> &'static str {
        "resolve version"
    }

    fn step(
        &self,
        package: &mut SourcePackage,
        runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError> {
        package.set_version(&self.version, self.git_count, runner)?;
        package.identity_mut().set_debian_revision(self.revision.as_str());
        Ok(())
    }
}
