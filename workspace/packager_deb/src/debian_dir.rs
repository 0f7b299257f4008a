use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::PathBuf,
};

use debian::{
    dch::Dch,
    dpkg_architecture::DpkgArchitecture,
    execute::{CommandRunner, Execute},
};
use log::info;
use serde::Deserialize;
use types::defaults::{
    DEBHELPER_BUILD_DEPENDENCY, DEBHELPER_COMPAT_LEVEL, LICENSE_CANDIDATES, SOURCE_FORMAT,
    STANDARDS_VERSION,
};

use crate::{error::PackagingError, source_package::SourcePackage};

fn default_arch_specific() -> bool {
    true
}

/// One binary package stanza of `debian/control`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BinaryPackage {
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub depends: Vec<String>,
    #[serde(default = "default_arch_specific")]
    pub arch_specific: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for BinaryPackage {
    fn default() -> Self {
        Self {
            suffix: None,
            depends: Vec::new(),
            arch_specific: true,
            description: None,
        }
    }
}

impl BinaryPackage {
    pub fn new(suffix: Option<&str>) -> Self {
        Self {
            suffix: suffix.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn depends<I, S>(mut self, depends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.depends.extend(depends.into_iter().map(Into::into));
        self
    }

    pub fn arch_independent(mut self) -> Self {
        self.arch_specific = false;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Writes the files under `<project>/debian/`.
/// Folds a multi-line value into deb822 continuation lines: a leading space
/// on every line after the first, ` .` for blank ones.
pub fn control_field_value(value: &str) -> String {
    let mut lines = value.trim_end().lines();
    let mut folded = lines.next().unwrap_or_default().trim_end().to_string();
    for line in lines {
        let line = line.trim_end();
        folded.push('\n');
        if line.trim().is_empty() {
            folded.push_str(" .");
        } else {
            folded.push(' ');
            folded.push_str(line);
        }
    }
    folded
}

pub struct DebianDir<'a> {
    package: &'a SourcePackage,
    runner: &'a dyn CommandRunner,
}

impl<'a> DebianDir<'a> {
    pub fn new(package: &'a SourcePackage, runner: &'a dyn CommandRunner) -> Self {
        Self { package, runner }
    }

    pub fn path(&self) -> Result<PathBuf, PackagingError> {
        Ok(self.package.debian_dir()?)
    }

    fn control_path(&self) -> Result<PathBuf, PackagingError> {
        Ok(self.path()?.join("control"))
    }

    pub fn create(&self) -> Result<PathBuf, PackagingError> {
        let path = self.path()?;
        fs::create_dir_all(&path)?;
        info!("Created {}", path.display());
        Ok(path)
    }

    /// Source stanza. Truncates any previous control file.
    pub fn initialize_control(&self) -> Result<(), PackagingError> {
        let identity = self.package.identity();
        let mut build_depends = vec![DEBHELPER_BUILD_DEPENDENCY.to_string()];
        build_depends.extend(identity.build_depends().iter().cloned());

        let mut control = File::create(self.control_path()?)?;
        writeln!(control, "Source: {}", identity.name()?)?;
        writeln!(control, "Maintainer: {}", identity.maintainer())?;
        writeln!(control, "Section: misc")?;
        writeln!(control, "Priority: optional")?;
        writeln!(control, "Standards-Version: {}", STANDARDS_VERSION)?;
        writeln!(control, "Build-Depends: {}", build_depends.join(", "))?;
        Ok(())
    }

    /// Appends a binary package stanza. Arch-specific packages get the host
    /// build architecture and the shlibs/misc substvars.
    pub fn add_package(&self, binary: &BinaryPackage) -> Result<(), PackagingError> {
        let identity = self.package.identity();
        let control_path = self.control_path()?;
        if !control_path.is_file() {
            return Err(PackagingError::ControlNotInitialized(control_path));
        }

        let package_name = identity.package_name(binary.suffix.as_deref())?;
        let mut depends = binary.depends.clone();
        let arch = if binary.arch_specific {
            depends.push("${shlibs:Depends}".to_string());
            depends.push("${misc:Depends}".to_string());
            DpkgArchitecture::new().build_arch(self.runner)?
        } else {
            "all".to_string()
        };

        let mut control = OpenOptions::new().append(true).open(&control_path)?;
        writeln!(control)?;
        writeln!(control, "Package: {}", package_name)?;
        writeln!(control, "Architecture: {}", arch)?;
        if !depends.is_empty() {
            writeln!(control, "Depends: {}", depends.join(", "))?;
        }
        if let Some(homepage) = identity.homepage() {
            writeln!(control, "Homepage: {}", homepage)?;
        }
        if let Some(description) = &binary.description {
            writeln!(control, "Description: {}", control_field_value(description))?;
        }
        info!("Added {} ({}) to {}", package_name, arch, control_path.display());
        Ok(())
    }

    pub fn write_rules(&self) -> Result<PathBuf, PackagingError> {
        let rules_path = self.path()?.join("rules");
        fs::write(&rules_path, self.package.build_config().render_rules())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&rules_path, fs::Permissions::from_mode(0o755))?;
        }
        Ok(rules_path)
    }

    /// `compat` and `source/format`.
    pub fn write_misc_files(&self) -> Result<(), PackagingError> {
        let debian_dir = self.path()?;
        fs::create_dir_all(debian_dir.join("source"))?;
        fs::write(
            debian_dir.join("compat"),
            format!("{}\n", DEBHELPER_COMPAT_LEVEL),
        )?;
        fs::write(
            debian_dir.join("source").join("format"),
            format!("{}\n", SOURCE_FORMAT),
        )?;
        Ok(())
    }

    /// Single released changelog entry at the debian version.
    pub fn write_dummy_changelog(&self) -> Result<(), PackagingError> {
        let identity = self.package.identity();
        let project_dir = self.package.project_dir()?;

        Dch::create(identity.debian_version()?, identity.name()?)
            .maintainer(identity.maintainer())
            .current_dir(&project_dir)
            .execute(self.runner)?;
        Dch::release()
            .maintainer(identity.maintainer())
            .current_dir(&project_dir)
            .execute(self.runner)?;
        Ok(())
    }

    /// Copies the first license file found upstream to `debian/copyright`.
    pub fn copy_license(&self) -> Result<PathBuf, PackagingError> {
        let project_dir = self.package.project_dir()?;
        let destination = self.path()?.join("copyright");

        let license = LICENSE_CANDIDATES
            .iter()
            .map(|candidate| project_dir.join(candidate))
            .find(|path| path.is_file())
            .ok_or_else(|| PackagingError::LicenseNotFound(project_dir.clone()))?;

        fs::copy(&license, &destination)?;
        info!("Copied {} to {}", license.display(), destination.display());
        Ok(license)
    }
}
