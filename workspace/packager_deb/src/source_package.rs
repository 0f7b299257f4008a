use std::{
    path::{Path, PathBuf},
    thread,
};

use debian::{
    execute::{CommandRunner, Invocation},
    git::GitRevisionCount,
};
use log::info;
use types::{
    defaults::FALLBACK_PARALLELISM,
    identity::{ConfigurationError, PackageIdentity},
};

use crate::{
    build_config::{BuildConfig, Phase},
    error::PackagingError,
};

/// Detected CPU count, or [`FALLBACK_PARALLELISM`] when unknown.
pub fn cpu_parallelism() -> usize {
    thread::available_parallelism()
        .map(|count| count.get())
        .unwrap_or(FALLBACK_PARALLELISM)
}

/// Everything known about the source package being produced. Every
/// operation takes it explicitly, there is no process-wide state.
#[derive(Debug, Clone, Default)]
pub struct SourcePackage {
    identity: PackageIdentity,
    build_config: BuildConfig,
    workdir: PathBuf,
}

impl SourcePackage {
    pub fn new(workdir: impl AsRef<Path>) -> Self {
        Self {
            identity: PackageIdentity::new(),
            build_config: BuildConfig::new(),
            workdir: workdir.as_ref().to_path_buf(),
        }
    }

    pub fn identity(&self) -> &PackageIdentity {
        &self.identity
    }

    pub fn identity_mut(&mut self) -> &mut PackageIdentity {
        &mut self.identity
    }

    pub fn build_config(&self) -> &BuildConfig {
        &self.build_config
    }

    pub fn build_config_mut(&mut self) -> &mut BuildConfig {
        &mut self.build_config
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Upstream checkout, `<workdir>/<name>`.
    pub fn project_dir(&self) -> Result<PathBuf, ConfigurationError> {
        Ok(self.workdir.join(self.identity.name()?))
    }

    pub fn debian_dir(&self) -> Result<PathBuf, ConfigurationError> {
        Ok(self.project_dir()?.join("debian"))
    }

    pub fn orig_tarball_name(&self) -> Result<String, ConfigurationError> {
        Ok(format!(
            "{}_{}.orig.tar.xz",
            self.identity.name()?,
            self.identity.version()?
        ))
    }

    pub fn orig_tarball_path(&self) -> Result<PathBuf, ConfigurationError> {
        Ok(self.workdir.join(self.orig_tarball_name()?))
    }

    /// Shell command run either in the project dir or in the work dir.
    pub fn shell(
        &self,
        script: impl Into<String>,
        in_project_dir: bool,
    ) -> Result<Invocation, ConfigurationError> {
        let dir = if in_project_dir {
            self.project_dir()?
        } else {
            self.workdir.clone()
        };
        Ok(Invocation::shell(script).current_dir(dir))
    }

    /// Sets the upstream version. With `git_count` the number of commits in
    /// the cloned repository is appended as `-<count>`.
    pub fn set_version(
        &mut self,
        version: &str,
        git_count: bool,
        runner: &dyn CommandRunner,
    ) -> Result<(), PackagingError> {
        let mut version = version.to_string();
        if git_count {
            let count = GitRevisionCount::new(self.project_dir()?).count(runner)?;
            version = format!("{}-{}", version, count);
        }
        info!("Upstream version: {}", version);
        self.identity.set_version(version);
        Ok(())
    }

    /// CMake configure, parallel make and `make install` into the main
    /// package's tree. Replaces whatever the three phases held before.
    pub fn configure_cmake(
        &mut self,
        targets: &[String],
        cmake_options: &[String],
        parallelism: Option<usize>,
    ) -> Result<(), PackagingError> {
        let name = self.identity.name()?.to_string();
        let jobs = parallelism.unwrap_or_else(cpu_parallelism);

        let mut configure = vec![
            "cmake".to_string(),
            ".".to_string(),
            format!("-DCMAKE_INSTALL_PREFIX=debian/{}/usr", name),
        ];
        configure.extend(cmake_options.iter().cloned());

        let mut build = vec!["make".to_string()];
        build.extend(targets.iter().cloned());
        build.push(format!("-j{}", jobs));

        self.build_config.set(Phase::Configure, [configure.join(" ")]);
        self.build_config.set(Phase::Build, [build.join(" ")]);
        self.build_config.set(
            Phase::Install,
            [format!("mkdir -p debian/{}/usr", name), "make install".to_string()],
        );
        self.identity.add_build_depend("cmake");
        Ok(())
    }

    pub fn configure_test(&mut self, command: impl Into<String>) {
        self.build_config.set(Phase::Test, [command.into()]);
    }

    /// Moves `src` (relative to the main package's install tree) into the
    /// `usr/` tree of `<name>-<suffix>`, e.g. `usr/include` into the dev
    /// package. Needs a configured install phase.
    pub fn relocate_installed_path(&mut self, src: &str, suffix: &str) -> Result<(), PackagingError> {
        if !self.build_config.contains(&Phase::Install) {
            return Err(PackagingError::InstallPhaseNotConfigured);
        }
        let name = self.identity.name()?.to_string();
        let target = self.identity.package_name(Some(suffix))?;

        self.build_config
            .append_unique(Phase::Install, format!("mkdir -p debian/{}/usr/", target));
        self.build_config.append(
            Phase::Install,
            format!("mv debian/{}/{} debian/{}/usr/", name, src, target),
        );
        Ok(())
    }

    /// Copies a file from the project dir into `dest` inside the install
    /// tree of the main package, or of `<name>-<suffix>`.
    pub fn install_file(
        &mut self,
        src: &str,
        dest: &str,
        suffix: Option<&str>,
    ) -> Result<(), PackagingError> {
        let target = self.identity.package_name(suffix)?;
        self.build_config
            .append_unique(Phase::Install, format!("mkdir -p debian/{}/{}", target, dest));
        self.build_config
            .append(Phase::Install, format!("cp {} debian/{}/{}", src, target, dest));
        Ok(())
    }

    /// Extra commands for any phase, standard or custom.
    pub fn add_phase_commands(&mut self, phase: Phase, commands: &[String]) {
        for command in commands {
            self.build_config.append(phase.clone(), command.clone());
        }
    }
}
