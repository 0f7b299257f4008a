use super::args::{ActionType, PkgBuilderArgs};
use clap::Parser;
use env_logger::Env;
use log::info;
use packager_deb::handler::{PackageError, dispatch_package_operation};
use thiserror::Error;
use types::config::{Config, ConfigError, ConfigFile};
use types::debian::DebCommandPayload;

#[derive(Error, Debug)]
pub enum PkgBuilderError {
    #[error(transparent)]
    PackageError(#[from] PackageError),

    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}

type Result<T> = std::result::Result<T, PkgBuilderError>;

pub fn run_cli() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = PkgBuilderArgs::parse();
    run(args, env!("CARGO_PKG_VERSION"))
}

pub fn run(args: PkgBuilderArgs, program_version: &str) -> Result<()> {
    let (config_path, payload) = match args.action {
        ActionType::Version => {
            println!("deb-buildscripts version: {}", program_version);
            return Ok(());
        }
        ActionType::Package(command) => (
            command.config,
            DebCommandPayload::Package {
                sign: command.sign,
                skip_build: command.skip_build,
                strict: command.strict,
            },
        ),
        ActionType::Debian(command) => (
            command.config,
            DebCommandPayload::Debian {
                strict: command.strict,
            },
        ),
    };

    let config_file = ConfigFile::<Config>::load(config_path)?;
    info!("Using manifest {}", config_file.path.display());
    // fails early when the manifest wants a newer deb-buildscripts
    config_file.clone().parse()?.build_env.validate(program_version)?;

    dispatch_package_operation(config_file, payload)?;
    Ok(())
}
