use debian::execute::CommandRunner;

use crate::{
    configs::pkg_config::PkgConfig,
    error::PackagingError,
    misc::build_pipeline::BuildStep,
    source,
    source_package::SourcePackage,
};

#[derive(Default)]
pub struct PrepareSource {
    commands: Vec<String>,
}

impl From<&PkgConfig> for PrepareSource {
    fn from(config: &PkgConfig) -> Self {
        PrepareSource {
            commands: config.source.prepare.clone(),
        }
    }
}

impl BuildStep for PrepareSource {
    fn name(&self) -> &'static str {
        "prepare source"
    }

    fn step(
        &self,
        package: &mut SourcePackage,
        runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError> {
        source::prepare_source(package, &self.commands, runner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debian::testing::RecordingRunner;

    #[test]
    fn test_nothing_to_prepare() {
        let mut package = SourcePackage::new(".");
        package.identity_mut().set_name("foo");
        let runner = RecordingRunner::new();

        PrepareSource::default().step(&mut package, &runner).unwrap();

        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn test_runs_commands_in_order() {
        let mut package = SourcePackage::new("work");
        package.identity_mut().set_name("foo");
        let runner = RecordingRunner::new();
        let step = PrepareSource {
            commands: vec!["git submodule update --init".into(), "rm -rf vendor".into()],
        };

        step.step(&mut package, &runner).unwrap();

        assert_eq!(
            runner.command_lines(),
            vec!["git submodule update --init", "rm -rf vendor"]
        );
    }
}
