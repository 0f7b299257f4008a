use thiserror::Error;

use crate::defaults::PLACEHOLDER_MAINTAINER;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("No package name set (set_name())")]
    MissingName,

    #[error("No upstream version set (set_version())")]
    MissingVersion,

    #[error("No debian revision set (set_debian_revision())")]
    MissingDebianRevision,
}

/// Name, versions and source-level metadata of the package being built.
///
/// Setters never validate. Getters of required fields fail with
/// [`ConfigurationError`] until the matching setter has run, so the fields
/// may be filled in any order as long as every read happens afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageIdentity {
    name: Option<String>,
    version: Option<String>,
    debian_revision: Option<String>,
    homepage: Option<String>,
    maintainer: Option<String>,
    build_depends: Vec<String>,
}

impl PackageIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn name(&self) -> Result<&str, ConfigurationError> {
        self.name.as_deref().ok_or(ConfigurationError::MissingName)
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    pub fn version(&self) -> Result<&str, ConfigurationError> {
        self.version
            .as_deref()
            .ok_or(ConfigurationError::MissingVersion)
    }

    pub fn set_debian_revision(&mut self, revision: impl Into<String>) {
        self.debian_revision = Some(revision.into());
    }

    /// Upstream version and debian revision joined as `<version>-<revision>`.
    pub fn debian_version(&self) -> Result<String, ConfigurationError> {
        let version = self.version()?;
        let revision = self
            .debian_revision
            .as_deref()
            .ok_or(ConfigurationError::MissingDebianRevision)?;
        Ok(format!("{}-{}", version, revision))
    }

    pub fn set_homepage(&mut self, homepage: impl Into<String>) {
        self.homepage = Some(homepage.into());
    }

    pub fn homepage(&self) -> Option<&str> {
        self.homepage.as_deref()
    }

    pub fn set_maintainer(&mut self, maintainer: impl Into<String>) {
        self.maintainer = Some(maintainer.into());
    }

    pub fn maintainer(&self) -> &str {
        self.maintainer.as_deref().unwrap_or(PLACEHOLDER_MAINTAINER)
    }

    /// Duplicates are kept, the list renders in push order.
    pub fn add_build_depend(&mut self, dependency: impl Into<String>) {
        self.build_depends.push(dependency.into());
    }

    pub fn build_depends(&self) -> &[String] {
        &self.build_depends
    }

    /// Binary package name, `<name>` or `<name>-<suffix>`.
    pub fn package_name(&self, suffix: Option<&str>) -> Result<String, ConfigurationError> {
        let name = self.name()?;
        Ok(match suffix {
            Some(suffix) if !suffix.is_empty() => format!("{}-{}", name, suffix),
            _ => name.to_string(),
        })
    }
}
