use log::warn;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    cmp::Ordering,
    env, fs,
    io::{self, ErrorKind},
    marker::PhantomData,
    path::PathBuf,
};
use thiserror::Error;

use crate::defaults::{CONFIG_FILE_NAME, WORKDIR_ROOT};

/// Represents the raw configuration file content
#[derive(Debug, Clone)]
pub struct ConfigFile<T> {
    content: Cow<'static, str>,
    _marker: PhantomData<T>,
    pub path: PathBuf,
}
impl<T> AsRef<str> for ConfigFile<T> {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

/// Errors that can occur during configuration handling
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error parsing TOML content
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Version parsing error
    #[error("Version parsing error: {0}")]
    VersionParse(#[from] semver::Error),

    /// Manifest asks for a newer deb-buildscripts
    #[error("{0}")]
    IncompatibleVersion(String),
}

pub trait ConfigType {
    fn default_config_path() -> &'static str;
}

impl<T: ConfigType> ConfigFile<T> {
    /// Loads configuration from the specified location or the current directory
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to configuration file or directory
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let path = Self::resolve_config_path(config_path)?;
        let content = fs::read_to_string(&path).map_err(ConfigError::Io)?;
        Ok(ConfigFile {
            content: Cow::Owned(content),
            _marker: PhantomData,
            path,
        })
    }

    fn resolve_config_path(config_path: Option<String>) -> Result<PathBuf, ConfigError> {
        let path = match config_path {
            Some(location) => {
                let path = PathBuf::from(location);
                if path.is_dir() {
                    path.join(T::default_config_path())
                } else {
                    path
                }
            }
            None => env::current_dir()
                .map_err(ConfigError::Io)?
                .join(T::default_config_path()),
        };

        if !path.exists() {
            return Err(ConfigError::Io(io::Error::new(
                ErrorKind::NotFound,
                format!("Path does not exist: {}", path.display()),
            )));
        }

        Ok(path)
    }

    /// Parses the configuration content into the generic type T
    pub fn parse(self) -> Result<T, ConfigError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        toml::from_str::<T>(&self.content).map_err(ConfigError::from)
    }

    /// Convenience method to load and parse in one operation
    pub fn load_and_parse(config_path: Option<String>) -> Result<T, ConfigError>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        Self::load(config_path)?.parse()
    }

    /// Directory holding the manifest, relative paths in it resolve against this.
    pub fn root(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from(WORKDIR_ROOT),
        }
    }
}

// only the [build_env] table, checked before the full manifest is parsed
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct Config {
    #[serde(default)]
    pub build_env: BuildEnv,
}
impl ConfigType for Config {
    fn default_config_path() -> &'static str {
        CONFIG_FILE_NAME
    }
}

/// Where and how the source package is produced
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct BuildEnv {
    /// Directory the upstream tree is cloned into and the tarball written to
    #[serde(default)]
    pub workdir: PathBuf,

    /// Sign the source package with debuild
    #[serde(default)]
    pub sign: bool,

    /// Key id handed to `debuild -k`, implies signing
    #[serde(default)]
    pub sign_key: Option<String>,

    /// Normalize file times in the upstream tree before packing
    #[serde(default)]
    pub source_date_epoch: Option<i64>,

    /// Minimal deb-buildscripts version the manifest was written for
    #[serde(default)]
    pub required_version: Option<Version>,
}

impl Default for BuildEnv {
    fn default() -> Self {
        BuildEnv {
            workdir: PathBuf::new(),
            sign: false,
            sign_key: None,
            source_date_epoch: None,
            required_version: None,
        }
    }
}

impl BuildEnv {
    /// Checks the manifest against the running deb-buildscripts version.
    /// Workdir defaults are resolved later, relative to the manifest.
    ///
    /// # Arguments
    ///
    /// * `current_version` - version of the running deb-buildscripts
    pub fn validate(&self, current_version: &str) -> Result<(), ConfigError> {
        let current_version = Version::parse(current_version).map_err(ConfigError::VersionParse)?;

        if let Some(required_version) = &self.required_version {
            match required_version.cmp(&current_version) {
                Ordering::Greater => {
                    return Err(ConfigError::IncompatibleVersion(format!(
                        "Required deb-buildscripts version {} is higher than current version {}",
                        required_version, current_version
                    )));
                }
                Ordering::Less => {
                    warn!(
                        "Required deb-buildscripts version {} is lower than current version {}. This may cause compatibility issues.",
                        required_version, current_version
                    );
                }
                Ordering::Equal => {}
            }
        }

        Ok(())
    }

    pub fn is_signed(&self) -> bool {
        self.sign || self.sign_key.is_some()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_config(dir: &std::path::Path, content: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "{}", content).unwrap();
        config_path
    }

    #[test]
    fn test_config_file_load_from_directory() {
        let dir = tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
            [build_env]
            workdir = "/tmp/test"
        "#,
        );

        let config_file =
            ConfigFile::<Config>::load(Some(dir.path().to_string_lossy().to_string())).unwrap();
        assert!(config_file.as_ref().contains("/tmp/test"));
        assert_eq!(config_file.root(), dir.path());
    }

    #[test]
    fn test_config_file_missing() {
        let dir = tempdir().unwrap();
        let result = ConfigFile::<Config>::load(Some(
            dir.path().join("nope.toml").to_string_lossy().to_string(),
        ));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_config_file_parse() {
        let dir = tempdir().unwrap();
        let config_path = write_config(
            dir.path(),
            r#"
            [build_env]
            workdir = "/tmp/test"
            sign_key = "ABCDEF01"
            required_version = "0.1.0"
        "#,
        );

        let config =
            ConfigFile::<Config>::load_and_parse(Some(config_path.to_string_lossy().to_string()))
                .unwrap();
        assert_eq!(config.build_env.workdir, PathBuf::from("/tmp/test"));
        assert_eq!(config.build_env.sign_key.as_deref(), Some("ABCDEF01"));
        assert!(config.build_env.is_signed());
        assert_eq!(config.build_env.required_version, Some(Version::new(0, 1, 0)));
    }

    #[test]
    fn test_build_env_table_is_optional() {
        let config: Config = toml::from_str("[package]\nname = \"foo\"\n").unwrap();
        assert_eq!(config.build_env, BuildEnv::default());
        assert!(!config.build_env.is_signed());
    }

    #[test]
    fn test_validate_rejects_newer_required_version() {
        let build_env = BuildEnv {
            required_version: Some(Version::new(9, 0, 0)),
            ..BuildEnv::default()
        };
        let result = build_env.validate("0.1.0");
        assert!(matches!(result, Err(ConfigError::IncompatibleVersion(_))));
    }

    #[test]
    fn test_validate_accepts_older_required_version() {
        let build_env = BuildEnv {
            required_version: Some(Version::new(0, 0, 1)),
            ..BuildEnv::default()
        };
        assert!(build_env.validate("0.1.0").is_ok());
        assert!(build_env.workdir.as_os_str().is_empty());
    }

    #[test]
    fn test_validate_rejects_unparsable_current_version() {
        let result = BuildEnv::default().validate("not-a-version");
        assert!(matches!(result, Err(ConfigError::VersionParse(_))));
    }
}
