use std::path::{Path, PathBuf};

use crate::execute::{Execute, Invocation};

#[derive(Debug, Clone, PartialEq, Eq)]
enum DchAction {
    Create { version: String, package: String },
    Release,
}

/// Wrapper around `dch` from devscripts.
///
/// ```
/// use debian::dch::Dch;
/// use debian::execute::Execute;
/// let create = Dch::create("1.0-1", "foo")
///     .maintainer("None <none@example.com>")
///     .current_dir("foo");
/// assert_eq!(
///     create.invocation().to_string(),
///     "DEBFULLNAME=None DEBEMAIL=none@example.com dch --create -v 1.0-1 --package foo ''"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Dch {
    action: DchAction,
    maintainer: Option<String>,
    current_dir: Option<PathBuf>,
}

impl Dch {
    /// New changelog with a single entry at `version`.
    pub fn create(version: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            action: DchAction::Create {
                version: version.into(),
                package: package.into(),
            },
            maintainer: None,
            current_dir: None,
        }
    }

    /// Marks the topmost entry as released.
    pub fn release() -> Self {
        Self {
            action: DchAction::Release,
            maintainer: None,
            current_dir: None,
        }
    }

    /// `Name <email>`, exported as DEBFULLNAME / DEBEMAIL.
    pub fn maintainer(mut self, maintainer: impl Into<String>) -> Self {
        self.maintainer = Some(maintainer.into());
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn build_args(&self) -> Vec<String> {
        match &self.action {
            DchAction::Create { version, package } => vec![
                "--create".to_string(),
                "-v".to_string(),
                version.clone(),
                "--package".to_string(),
                package.clone(),
                String::new(),
            ],
            DchAction::Release => vec!["-r".to_string(), String::new()],
        }
    }
}

/// Splits `Name <email>` into its parts. Without brackets the whole string is
/// taken as the email address.
pub fn split_maintainer(maintainer: &str) -> (Option<String>, String) {
    let maintainer = maintainer.trim();
    match (maintainer.find('<'), maintainer.rfind('>')) {
        (Some(start), Some(end)) if start < end => {
            let name = maintainer[..start].trim();
            let email = maintainer[start + 1..end].trim().to_string();
            let name = if name.is_empty() {
                None
            } else {
                Some(name.to_string())
            };
            (name, email)
        }
        _ => (None, maintainer.to_string()),
    }
}

impl Execute for Dch {
    fn invocation(&self) -> Invocation {
        let mut invocation = Invocation::program("dch").args(self.build_args());
        if let Some(maintainer) = &self.maintainer {
            let (name, email) = split_maintainer(maintainer);
            if let Some(name) = name {
                invocation = invocation.env("DEBFULLNAME", name);
            }
            invocation = invocation.env("DEBEMAIL", email);
        }
        if let Some(dir) = &self.current_dir {
            invocation = invocation.current_dir(dir);
        }
        invocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_release_invocation() {
        let invocation = Dch::release().current_dir("foo").invocation();
        assert_eq!(invocation.to_string(), "dch -r ''");
        assert_eq!(invocation.working_dir(), Some(Path::new("foo")));
    }

    #[test]
    fn test_create_args() {
        let dch = Dch::create("2.1-3", "bar");
        assert_eq!(
            dch.build_args(),
            vec!["--create", "-v", "2.1-3", "--package", "bar", ""]
        );
        assert!(dch.invocation().envs().is_empty());
    }

    #[test_case("Jane Doe <jane@example.org>", Some("Jane Doe"), "jane@example.org")]
    #[test_case("<bot@example.org>", None, "bot@example.org")]
    #[test_case("plain@example.org", None, "plain@example.org")]
    fn test_split_maintainer(input: &str, name: Option<&str>, email: &str) {
        let (actual_name, actual_email) = split_maintainer(input);
        assert_eq!(actual_name.as_deref(), name);
        assert_eq!(actual_email, email);
    }
}
