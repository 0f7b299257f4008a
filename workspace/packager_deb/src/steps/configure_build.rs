use debian::execute::CommandRunner;
use log::info;

use crate::{
    build_config::Phase,
    configs::pkg_config::{BuildFields, BuildSystem, PkgConfig},
    error::PackagingError,
    misc::build_pipeline::BuildStep,
    source_package::SourcePackage,
};

/// Fills the build registry: build system first, then test command,
/// relocations, installed files and extra phase commands.
#[derive(Default)]
pub struct ConfigureBuild {
    build: BuildFields,
}

impl From<&PkgConfig> for ConfigureBuild {
    fn from(config: &PkgConfig) -> Self {
        ConfigureBuild {
            build: config.build.clone(),
        }
    }
}

impl BuildStep for ConfigureBuild {
    fn name(&self) -> &'static str {
        "configure build"
    }

    fn step(
        &self,
        package: &mut SourcePackage,
        _runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError> {
        if let Some(BuildSystem::Cmake(cmake)) = &self.build.system {
            package.configure_cmake(&cmake.targets, &cmake.options, cmake.parallelism)?;
        }
        if let Some(test) = &self.build.test {
            package.configure_test(test.as_str());
        }
        for relocation in &self.build.relocate {
            package.relocate_installed_path(&relocation.path, &relocation.suffix)?;
        }
        for file in &self.build.install_files {
            package.install_file(&file.src, &file.dest, file.suffix.as_deref())?;
        }
        for phase in &self.build.phases {
            package.add_phase_commands(Phase::from(phase.name.as_str()), &phase.commands);
        }
        info!(
            "Configured phases: {}",
            package
                .build_config()
                .phases()
                .map(|(phase, _)| phase.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(())
    }
}
