use std::fmt;

/// A debhelper build step, rendered as `override_dh_auto_<key>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    Configure,
    Build,
    Install,
    Test,
    Custom(String),
}

impl Phase {
    pub fn key(&self) -> &str {
        match self {
            Phase::Configure => "configure",
            Phase::Build => "build",
            Phase::Install => "install",
            Phase::Test => "test",
            Phase::Custom(key) => key,
        }
    }

    pub fn target(&self) -> String {
        format!("override_dh_auto_{}", self.key())
    }
}

impl From<&str> for Phase {
    fn from(key: &str) -> Self {
        match key {
            "configure" => Phase::Configure,
            "build" => Phase::Build,
            "install" => Phase::Install,
            "test" => Phase::Test,
            other => Phase::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Ordered mapping from phase to the shell commands run in it.
///
/// Phases keep the position of their first insertion. Replacing a phase's
/// commands leaves its position alone; only [`BuildConfig::clear`] forgets
/// phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    phases: Vec<(Phase, Vec<String>)>,
}

impl BuildConfig {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, phase: Phase) -> &mut Vec<String> {
        let index = match self.phases.iter().position(|(key, _)| *key == phase) {
            Some(index) => index,
            None => {
                self.phases.push((phase, Vec::new()));
                self.phases.len() - 1
            }
        };
        &mut self.phases[index].1
    }

    /// Replaces the commands of `phase`.
    pub fn set<I, S>(&mut self, phase: Phase, commands: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.entry(phase) = commands.into_iter().map(Into::into).collect();
    }

    /// Inserts `phase` if needed and appends `command` to it.
    pub fn append(&mut self, phase: Phase, command: impl Into<String>) {
        self.entry(phase).push(command.into());
    }

    /// Like [`BuildConfig::append`], but skips commands already present in
    /// the phase. Returns whether the command was added.
    pub fn append_unique(&mut self, phase: Phase, command: impl Into<String>) -> bool {
        let command = command.into();
        let commands = self.entry(phase);
        if commands.contains(&command) {
            return false;
        }
        commands.push(command);
        true
    }

    pub fn commands(&self, phase: &Phase) -> Option<&[String]> {
        self.phases
            .iter()
            .find(|(key, _)| key == phase)
            .map(|(_, commands)| commands.as_slice())
    }

    pub fn contains(&self, phase: &Phase) -> bool {
        self.commands(phase).is_some()
    }

    pub fn phases(&self) -> impl Iterator<Item = (&Phase, &[String])> {
        self.phases
            .iter()
            .map(|(phase, commands)| (phase, commands.as_slice()))
    }

    pub fn clear(&mut self) {
        self.phases.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// `debian/rules` content: the dh catch-all followed by one override
    /// target per phase.
    pub fn render_rules(&self) -> String {
        let mut rules = String::from("#!/usr/bin/make -f\n%:\n\tdh $@\n");
        for (phase, commands) in self.phases() {
            rules.push_str(&phase.target());
            rules.push_str(":\n");
            for command in commands {
                rules.push('\t');
                rules.push_str(command);
                rules.push('\n');
            }
        }
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn keys(config: &BuildConfig) -> Vec<String> {
        config.phases().map(|(phase, _)| phase.to_string()).collect()
    }

    #[test]
    fn test_render_single_phase() {
        let mut config = BuildConfig::new();
        config.set(Phase::Build, ["make -j4"]);

        assert_eq!(
            config.render_rules(),
            "#!/usr/bin/make -f\n%:\n\tdh $@\noverride_dh_auto_build:\n\tmake -j4\n"
        );
    }

    #[test]
    fn test_render_empty_registry() {
        assert_eq!(
            BuildConfig::new().render_rules(),
            "#!/usr/bin/make -f\n%:\n\tdh $@\n"
        );
    }

    #[test]
    fn test_set_keeps_position() {
        let mut config = BuildConfig::new();
        config.set(Phase::Configure, ["a"]);
        config.set(Phase::Build, ["b"]);
        config.set(Phase::Configure, ["c", "d"]);

        assert_eq!(keys(&config), ["configure", "build"]);
        assert_eq!(
            config.commands(&Phase::Configure).unwrap(),
            ["c".to_string(), "d".to_string()]
        );
    }

    #[test]
    fn test_append_accumulates() {
        let mut config = BuildConfig::new();
        config.append(Phase::Install, "one");
        config.append(Phase::Test, "check");
        config.append(Phase::Install, "two");

        assert_eq!(keys(&config), ["install", "test"]);
        assert_eq!(
            config.commands(&Phase::Install).unwrap(),
            ["one".to_string(), "two".to_string()]
        );
    }

    #[test]
    fn test_append_unique() {
        let mut config = BuildConfig::new();
        assert!(config.append_unique(Phase::Install, "mkdir -p x"));
        assert!(!config.append_unique(Phase::Install, "mkdir -p x"));
        assert_eq!(config.commands(&Phase::Install).unwrap().len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut config = BuildConfig::new();
        config.append(Phase::Build, "make");
        config.clear();

        assert!(config.is_empty());
        assert!(!config.contains(&Phase::Build));
    }

    #[test_case("configure", Phase::Configure)]
    #[test_case("build", Phase::Build)]
    #[test_case("install", Phase::Install)]
    #[test_case("test", Phase::Test)]
    #[test_case("clean", Phase::Custom("clean".to_string()))]
    fn test_phase_from_key(key: &str, expected: Phase) {
        let phase = Phase::from(key);
        assert_eq!(phase, expected);
        assert_eq!(phase.target(), format!("override_dh_auto_{}", key));
    }

    #[test]
    fn test_render_custom_phase_in_insertion_order() {
        let mut config = BuildConfig::new();
        config.append(Phase::from("clean"), "rm -rf build");
        config.append(Phase::Build, "make");

        let rules = config.render_rules();
        let clean = rules.find("override_dh_auto_clean:").unwrap();
        let build = rules.find("override_dh_auto_build:").unwrap();
        assert!(clean < build);
        assert!(rules.contains("override_dh_auto_clean:\n\trm -rf build\n"));
    }
}
