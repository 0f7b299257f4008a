use debian::execute::CommandRunner;

use crate::{
    configs::pkg_config::PkgConfig,
    error::PackagingError,
    misc::build_pipeline::BuildStep,
    source,
    source_package::SourcePackage,
};

#[derive(Default)]
pub struct PackSource {
    source_date_epoch: Option<i64>,
}

impl From<&PkgConfig> for PackSource {
    fn from(config: &PkgConfig) -> Self {
        PackSource {
            source_date_epoch: config.build_env.source_date_epoch,
        }
    }
}

impl BuildStep for PackSource {
    fn name(&self) -> &'static str {
        "pack source"
    }

    fn step(
        &self,
        package: &mut SourcePackage,
        runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError> {
        source::pack_source(package, self.source_date_epoch, runner)?;
        Ok(())
    }
}
