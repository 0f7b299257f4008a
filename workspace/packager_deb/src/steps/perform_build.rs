use debian::{debuild::Signing, execute::CommandRunner};
use types::config::BuildEnv;

use crate::{
    configs::pkg_config::PkgConfig,
    error::PackagingError,
    misc::build_pipeline::BuildStep,
    source,
    source_package::SourcePackage,
};

#[derive(Default)]
pub struct PerformBuild {
    signing: Signing,
}

fn signing(build_env: &BuildEnv) -> Signing {
    if !build_env.is_signed() {
        return Signing::Unsigned;
    }
    match &build_env.sign_key {
        Some(key) => Signing::Key(key.clone()),
        None => Signing::DefaultKey,
    }
}

impl From<&PkgConfig> for PerformBuild {
    fn from(config: &PkgConfig) -> Self {
        PerformBuild {
            signing: signing(&config.build_env),
        }
    }
}

impl BuildStep for PerformBuild {
    fn name(&self) -> &'static str {
        "perform build"
    }

    fn step(
        &self,
        package: &mut SourcePackage,
        runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError> {
        source::perform_build(package, self.signing.clone(), runner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debian::testing::RecordingRunner;
    use test_case::test_case;

    #[test_case(false, None, Signing::Unsigned)]
    #[test_case(true, None, Signing::DefaultKey)]
    #[test_case(false, Some("0xDEADBEEF"), Signing::Key("0xDEADBEEF".to_string()))]
    fn test_signing_from_build_env(sign: bool, sign_key: Option<&str>, expected: Signing) {
        let build_env = BuildEnv {
            sign,
            sign_key: sign_key.map(str::to_string),
            ..BuildEnv::default()
        };
        assert_eq!(signing(&build_env), expected);
    }

    #[test]
    fn test_signed_build() {
        let mut package = SourcePackage::new("work");
        package.identity_mut().set_name("foo");
        let runner = RecordingRunner::new();
        let step = PerformBuild {
            signing: Signing::Key("ABCD".to_string()),
        };

        step.step(&mut package, &runner).unwrap();

        assert_eq!(runner.command_lines(), vec!["debuild -S -kABCD"]);
    }
}
