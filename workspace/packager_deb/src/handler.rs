use std::path::{Path, PathBuf};

use debian::execute::{ExitPolicy, SystemRunner};
use log::info;
use thiserror::Error;
use types::{
    config::{Config, ConfigError, ConfigFile, ConfigType},
    debian::DebCommandPayload,
    defaults::{CONFIG_FILE_NAME, WORKDIR_ROOT},
};

use crate::{
    configs::pkg_config::PkgConfig,
    error::PackagingError,
    misc::build_pipeline::BuildPipeline,
    source_package::SourcePackage,
    steps::{
        clone_source::CloneSource, configure_build::ConfigureBuild,
        create_debian_dir::CreateDebianDir, pack_source::PackSource,
        perform_build::PerformBuild, prepare_source::PrepareSource,
        resolve_version::ResolveVersion,
    },
};

impl ConfigType for PkgConfig {
    fn default_config_path() -> &'static str {
        CONFIG_FILE_NAME
    }
}

#[derive(Debug, Error)]
pub enum PackageError {
    #[error(transparent)]
    PackagingError(#[from] PackagingError),
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
}

pub fn dispatch_package_operation(
    config: ConfigFile<Config>,
    cmd_payload: DebCommandPayload,
) -> Result<(), PackageError> {
    // ReParse config first
    let mut pkg_config =
        ConfigFile::<PkgConfig>::load_and_parse(Some(config.path.display().to_string()))?;

    if let DebCommandPayload::Package {
        sign: Some(sign), ..
    } = &cmd_payload
    {
        pkg_config.build_env.sign = *sign;
        if !sign {
            pkg_config.build_env.sign_key = None;
        }
    }

    normalize_config(&mut pkg_config, &config.root());

    let policy = if cmd_payload.is_strict() {
        ExitPolicy::Fail
    } else {
        ExitPolicy::Ignore
    };
    let pipeline = match cmd_payload {
        DebCommandPayload::Package { skip_build, .. } => package_pipeline(&pkg_config, skip_build),
        DebCommandPayload::Debian { .. } => debian_pipeline(&pkg_config),
    };

    let mut package = source_package(&pkg_config);
    info!(
        "Building {} in {}",
        pkg_config.package.name,
        package.workdir().display()
    );
    pipeline.execute(&mut package, &SystemRunner::new(policy))?;
    Ok(())
}

/// Clone, pack, describe and build the source package.
pub fn package_pipeline(config: &PkgConfig, skip_build: bool) -> BuildPipeline {
    let mut pipeline = BuildPipeline::new();
    pipeline
        .add_step(CloneSource::from(config))
        .add_step(PrepareSource::from(config))
        .add_step(ResolveVersion::from(config))
        .add_step(PackSource::from(config))
        .add_step(ConfigureBuild::from(config))
        .add_step(CreateDebianDir::from(config));
    if !skip_build {
        pipeline.add_step(PerformBuild::from(config));
    }
    pipeline
}

/// Regenerates `debian/` for an existing checkout.
pub fn debian_pipeline(config: &PkgConfig) -> BuildPipeline {
    let mut pipeline = BuildPipeline::new();
    pipeline
        .add_step(ResolveVersion::from(config))
        .add_step(ConfigureBuild::from(config))
        .add_step(CreateDebianDir::from(config));
    pipeline
}

pub fn source_package(config: &PkgConfig) -> SourcePackage {
    let mut package = SourcePackage::new(&config.build_env.workdir);
    let identity = package.identity_mut();
    identity.set_name(config.package.name.as_str());
    if let Some(homepage) = &config.package.homepage {
        identity.set_homepage(homepage.as_str());
    }
    if let Some(maintainer) = &config.package.maintainer {
        identity.set_maintainer(maintainer.as_str());
    }
    for dependency in &config.package.build_depends {
        identity.add_build_depend(dependency.as_str());
    }
    package
}

pub fn normalize_config(config: &mut PkgConfig, config_root: &Path) {
    let mut workdir = config.build_env.workdir.clone();
    if workdir.as_os_str().is_empty() {
        workdir = PathBuf::from(WORKDIR_ROOT);
    }
    config.build_env.workdir = expand_path(&workdir, config_root);
}

/// Expands `~` and resolves relative paths against `base`.
pub fn expand_path(dir: &Path, base: &Path) -> PathBuf {
    let dir_str = dir.to_string_lossy();
    if dir_str.starts_with('~') {
        PathBuf::from(shellexpand::tilde(&dir_str).to_string())
    } else if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        base.join(dir)
    }
}
