use serde::Deserialize;
use types::{config::BuildEnv, git_remote::GitRemote};

use crate::debian_dir::BinaryPackage;

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PackageFields {
    pub name: String,
    pub version: String,
    pub revision: String,
    /// Append the upstream commit count to the version
    #[serde(default)]
    pub git_count: bool,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub maintainer: Option<String>,
    #[serde(default)]
    pub build_depends: Vec<String>,
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct SourceFields {
    #[serde(default)]
    pub git_url: Option<GitRemote>,
    /// Shell commands run inside the checkout before it is packed
    #[serde(default)]
    pub prepare: Vec<String>,
}

fn default_targets() -> Vec<String> {
    vec!["all".to_string()]
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CmakeConfig {
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub parallelism: Option<usize>,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BuildSystem {
    Cmake(CmakeConfig),
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Relocation {
    pub path: String,
    pub suffix: String,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct InstallFile {
    pub src: String,
    pub dest: String,
    #[serde(default)]
    pub suffix: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PhaseCommands {
    pub name: String,
    pub commands: Vec<String>,
}

#[derive(Debug, Deserialize, PartialEq, Clone, Default)]
pub struct BuildFields {
    #[serde(default)]
    pub system: Option<BuildSystem>,
    #[serde(default)]
    pub test: Option<String>,
    #[serde(default)]
    pub relocate: Vec<Relocation>,
    #[serde(default)]
    pub install_files: Vec<InstallFile>,
    #[serde(default)]
    pub phases: Vec<PhaseCommands>,
}

/// Content of `deb-buildscripts.toml`
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PkgConfig {
    pub package: PackageFields,
    #[serde(default)]
    pub source: SourceFields,
    #[serde(default)]
    pub build: BuildFields,
    #[serde(default)]
    pub packages: Vec<BinaryPackage>,
    #[serde(default)]
    pub build_env: BuildEnv,
}

impl PkgConfig {
    /// Configured binary packages, or the main package alone.
    pub fn binary_packages(&self) -> Vec<BinaryPackage> {
        if self.packages.is_empty() {
            vec![BinaryPackage::default()]
        } else {
            self.packages.clone()
        }
    }
}
