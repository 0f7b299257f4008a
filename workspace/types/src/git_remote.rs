use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum GitRemoteError {
    #[error("Invalid repository url '{0}': {1}")]
    InvalidUrl(String, url::ParseError),

    #[error("Repository location must not be empty")]
    Empty,
}

/// Anything `git clone` accepts as a repository location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GitRemote {
    /// `https://`, `ssh://`, `git://`, `file://`, ...
    Url(Url),
    /// scp-like syntax, `git@github.com:owner/repo.git`
    Scp(String),
    Path(PathBuf),
}

impl GitRemote {
    pub fn parse(location: &str) -> Result<Self, GitRemoteError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(GitRemoteError::Empty);
        }
        if location.contains("://") {
            return Url::parse(location)
                .map(GitRemote::Url)
                .map_err(|err| GitRemoteError::InvalidUrl(location.to_string(), err));
        }
        // scp-like only when the colon comes before the first slash
        let scp = Regex::new(r"^([\w.\-]+@)?[\w.\-]+:[^/]").expect("valid scp regex");
        if scp.is_match(location) {
            return Ok(GitRemote::Scp(location.to_string()));
        }
        Ok(GitRemote::Path(PathBuf::from(location)))
    }
}

impl fmt::Display for GitRemote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitRemote::Url(url) => write!(f, "{}", url),
            GitRemote::Scp(location) => write!(f, "{}", location),
            GitRemote::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Serialize for GitRemote {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GitRemote {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct GitRemoteVisitor;

        impl<'de> de::Visitor<'de> for GitRemoteVisitor {
            type Value = GitRemote;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a git repository url, scp-like location or local path")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                GitRemote::parse(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_string(GitRemoteVisitor)
    }
}
