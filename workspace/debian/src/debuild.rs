use std::path::{Path, PathBuf};

use crate::execute::{Execute, Invocation};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Signing {
    /// `-us -uc`
    #[default]
    Unsigned,
    /// Signs with debsign's default key.
    DefaultKey,
    /// `-k<key id>`
    Key(String),
}

/// Source-only `debuild` run.
#[derive(Debug, Clone, Default)]
pub struct Debuild {
    signing: Signing,
    current_dir: Option<PathBuf>,
}

impl Debuild {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signing(mut self, signing: Signing) -> Self {
        self.signing = signing;
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    fn build_args(&self) -> Vec<String> {
        let mut args = vec!["-S".to_string()];
        match &self.signing {
            Signing::Unsigned => {
                args.push("-us".to_string());
                args.push("-uc".to_string());
            }
            Signing::DefaultKey => {}
            Signing::Key(key) => args.push(format!("-k{}", key)),
        }
        args
    }
}

impl Execute for Debuild {
    fn invocation(&self) -> Invocation {
        let invocation = Invocation::program("debuild").args(self.build_args());
        match &self.current_dir {
            Some(dir) => invocation.current_dir(dir),
            None => invocation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Signing::Unsigned, "debuild -S -us -uc")]
    #[test_case(Signing::DefaultKey, "debuild -S")]
    #[test_case(Signing::Key("0xDEADBEEF".to_string()), "debuild -S -k0xDEADBEEF")]
    fn test_invocation(signing: Signing, expected: &str) {
        let debuild = Debuild::new().signing(signing).current_dir("foo");
        assert_eq!(debuild.invocation().to_string(), expected);
        assert_eq!(debuild.invocation().working_dir(), Some(Path::new("foo")));
    }
}
