use debian::execute::CommandRunner;
use log::info;

use crate::{
    configs::pkg_config::PkgConfig,
    debian_dir::{BinaryPackage, DebianDir},
    error::PackagingError,
    misc::build_pipeline::BuildStep,
    source_package::SourcePackage,
};

#[derive(Default)]
pub struct CreateDebianDir {
    packages: Vec<BinaryPackage>,
}

impl From<&PkgConfig> for CreateDebianDir {
    fn from(config: &PkgConfig) -> Self {
        CreateDebianDir {
            packages: config.binary_packages(),
        }
    }
}

impl BuildStep for CreateDebianDir {
    fn name(&self) -> &'static str {
        "create debian dir"
    }

    fn step(
        &self,
        package: &mut SourcePackage,
        runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError> {
        let debian_dir = DebianDir::new(package, runner);
        let path = debian_dir.create()?;
        debian_dir.copy_license()?;
        debian_dir.initialize_control()?;
        for binary in &self.packages {
            debian_dir.add_package(binary)?;
        }
        debian_dir.write_rules()?;
        debian_dir.write_misc_files()?;
        debian_dir.write_dummy_changelog()?;
        info!("Created debian dir: {}", path.display());
        Ok(())
    }
}
