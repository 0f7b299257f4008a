use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(name = "deb-buildscripts", author, version, about)]
pub struct PkgBuilderArgs {
    #[clap(subcommand)]
    pub action: ActionType,
}

#[derive(Debug, Subcommand)]
pub enum ActionType {
    /// clone upstream, pack the orig tarball, generate debian/ and run debuild -S
    Package(PackageCommand),
    /// only (re)generate debian/ inside an existing checkout
    Debian(DebianCommand),
    // deb-buildscripts version
    Version,
}

#[derive(Debug, Args)]
pub struct PackageCommand {
    /// location of deb-buildscripts config_file, either full path
    /// or directory to deb-buildscripts.toml is located
    /// if not given current directory is searched for deb-buildscripts.toml
    pub config: Option<String>,
    /// overrides config value
    /// signs the source package or not based on supplied value
    #[clap(long)]
    pub sign: Option<bool>,
    /// stop after debian/ is generated
    #[clap(long)]
    pub skip_build: bool,
    /// abort on the first command exiting with non-zero status
    #[clap(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct DebianCommand {
    /// location of deb-buildscripts config_file, either full path
    /// or directory to deb-buildscripts.toml is located
    /// if not given current directory is searched for deb-buildscripts.toml
    pub config: Option<String>,
    /// abort on the first command exiting with non-zero status
    #[clap(long)]
    pub strict: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_package_defaults() {
        let args = PkgBuilderArgs::try_parse_from(["deb-buildscripts", "package"]).unwrap();
        match args.action {
            ActionType::Package(command) => {
                assert_eq!(command.config, None);
                assert_eq!(command.sign, None);
                assert!(!command.skip_build);
                assert!(!command.strict);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_package_overrides() {
        let args = PkgBuilderArgs::try_parse_from([
            "deb-buildscripts",
            "package",
            "demos/hello-cmake",
            "--sign",
            "false",
            "--skip-build",
            "--strict",
        ])
        .unwrap();
        match args.action {
            ActionType::Package(command) => {
                assert_eq!(command.config.as_deref(), Some("demos/hello-cmake"));
                assert_eq!(command.sign, Some(false));
                assert!(command.skip_build);
                assert!(command.strict);
            }
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_debian_command() {
        let args =
            PkgBuilderArgs::try_parse_from(["deb-buildscripts", "debian", "--strict"]).unwrap();
        assert!(matches!(
            args.action,
            ActionType::Debian(DebianCommand { config: None, strict: true })
        ));
    }

    #[test_case(&["deb-buildscripts"] ; "missing subcommand")]
    #[test_case(&["deb-buildscripts", "package", "--sign", "maybe"] ; "invalid sign value")]
    #[test_case(&["deb-buildscripts", "lintian"] ; "unknown subcommand")]
    fn test_rejected_arguments(argv: &[&str]) {
        assert!(PkgBuilderArgs::try_parse_from(argv).is_err());
    }
}
