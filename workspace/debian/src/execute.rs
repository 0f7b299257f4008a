use log::{info, warn};
use std::{
    fmt,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecuteError {
    #[error("Command execution failed: {0}")]
    CommandFailed(#[from] std::io::Error),

    #[error("Command '{0}' failed with status: {1}")]
    CommandStatusError(String, i32),
}

/// What a [`SystemRunner`] does when a command exits non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Log a warning and carry on, the caller assumes success.
    #[default]
    Ignore,
    /// Turn the exit status into [`ExecuteError::CommandStatusError`].
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Program {
    Exec { program: String, args: Vec<String> },
    Shell(String),
}

/// A command line to run: either a program with an argument vector or a
/// script handed to `sh -c` for the rare cases that need shell syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: Program,
    current_dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl Invocation {
    pub fn program(program: impl Into<String>) -> Self {
        Self {
            program: Program::Exec {
                program: program.into(),
                args: Vec::new(),
            },
            current_dir: None,
            envs: Vec::new(),
        }
    }

    pub fn shell(script: impl Into<String>) -> Self {
        Self {
            program: Program::Shell(script.into()),
            current_dir: None,
            envs: Vec::new(),
        }
    }

    /// Appends an argument. Ignored for shell scripts.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        if let Program::Exec { args, .. } = &mut self.program {
            args.push(arg.into());
        }
        self
    }

    pub fn args<I, S>(mut self, new_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in new_args {
            self = self.arg(arg);
        }
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn program_name(&self) -> &str {
        match &self.program {
            Program::Exec { program, .. } => program,
            Program::Shell(_) => "sh",
        }
    }

    pub fn arguments(&self) -> Vec<String> {
        match &self.program {
            Program::Exec { args, .. } => args.clone(),
            Program::Shell(script) => vec!["-c".to_string(), script.clone()],
        }
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn envs(&self) -> &[(String, String)] {
        &self.envs
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(self.program_name());
        command.args(self.arguments());
        for (key, value) in &self.envs {
            command.env(key, value);
        }
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
    }
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:+,@%~${}()<>".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.envs {
            write!(f, "{}={} ", key, quote(value))?;
        }
        match &self.program {
            Program::Exec { program, args } => {
                write!(f, "{}", program)?;
                for arg in args {
                    write!(f, " {}", quote(arg))?;
                }
                Ok(())
            }
            Program::Shell(script) => write!(f, "{}", script),
        }
    }
}

/// Seam between the packaging logic and the processes it starts.
pub trait CommandRunner {
    /// Runs the command, its stdout goes to the log.
    fn run(&self, invocation: &Invocation) -> Result<(), ExecuteError>;

    /// Runs the command and returns its stdout.
    fn output(&self, invocation: &Invocation) -> Result<String, ExecuteError>;
}

/// Anything that knows the command line it stands for.
pub trait Execute {
    fn invocation(&self) -> Invocation;

    fn execute(&self, runner: &dyn CommandRunner) -> Result<(), ExecuteError> {
        runner.run(&self.invocation())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    policy: ExitPolicy,
}

impl SystemRunner {
    pub fn new(policy: ExitPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ExitPolicy {
        self.policy
    }

    fn check_status(&self, invocation: &Invocation, code: Option<i32>) -> Result<(), ExecuteError> {
        let code = code.unwrap_or(-1);
        match self.policy {
            ExitPolicy::Fail => Err(ExecuteError::CommandStatusError(
                invocation.to_string(),
                code,
            )),
            ExitPolicy::Ignore => {
                warn!("'{}' exited with status {}, ignoring", invocation, code);
                Ok(())
            }
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<(), ExecuteError> {
        info!("Running: {}", invocation);
        let mut command = invocation.to_command();
        command.stdout(Stdio::piped()).stderr(Stdio::inherit());

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) if self.policy == ExitPolicy::Ignore => {
                warn!("Failed to start '{}': {}, ignoring", invocation, err);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        // drain stdout before waiting, tools may print non-UTF-8 bytes
        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout);
            let mut line = Vec::new();
            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line) {
                    Ok(0) => break,
                    Ok(_) => info!("{}", String::from_utf8_lossy(&line).trim_end_matches('\n')),
                    Err(err) => {
                        warn!("Failed to read output of '{}': {}", invocation, err);
                        break;
                    }
                }
            }
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            self.check_status(invocation, status.code())
        }
    }

    fn output(&self, invocation: &Invocation) -> Result<String, ExecuteError> {
        info!("Running: {}", invocation);
        let output = invocation.to_command().stderr(Stdio::inherit()).output()?;

        if !output.status.success() {
            self.check_status(invocation, output.status.code())?;
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_invocation_display() {
        let invocation = Invocation::program("dch")
            .args(["--create", "-v", "1.0-1", "--package", "foo", ""])
            .env("DEBEMAIL", "none@example.com");
        assert_eq!(
            invocation.to_string(),
            "DEBEMAIL=none@example.com dch --create -v 1.0-1 --package foo ''"
        );
    }

    #[test_case("plain", "plain")]
    #[test_case("two words", "'two words'")]
    #[test_case("it's", r"'it'\''s'")]
    #[test_case("${misc:Depends}", "${misc:Depends}")]
    fn test_quote(arg: &str, expected: &str) {
        assert_eq!(quote(arg), expected);
    }

    #[test]
    fn test_shell_invocation() {
        let invocation = Invocation::shell("git rev-list --all | wc -l")
            .arg("ignored")
            .current_dir("project");
        assert_eq!(invocation.program_name(), "sh");
        assert_eq!(
            invocation.arguments(),
            vec!["-c".to_string(), "git rev-list --all | wc -l".to_string()]
        );
        assert_eq!(invocation.working_dir(), Some(Path::new("project")));
    }

    #[test]
    fn test_output_captures_stdout() {
        let runner = SystemRunner::new(ExitPolicy::Fail);
        let output = runner
            .output(&Invocation::shell("printf 'DEB_BUILD_ARCH=amd64\\n'"))
            .unwrap();
        assert_eq!(output, "DEB_BUILD_ARCH=amd64\n");
    }

    #[test]
    fn test_ignore_policy_swallows_failures() {
        let runner = SystemRunner::new(ExitPolicy::Ignore);
        assert!(runner.run(&Invocation::shell("exit 3")).is_ok());
        assert!(runner
            .run(&Invocation::program("definitely-not-a-real-program-xyz"))
            .is_ok());
        assert_eq!(
            runner
                .output(&Invocation::shell("echo partial; exit 1"))
                .unwrap(),
            "partial\n"
        );
    }

    #[test]
    fn test_run_streams_non_utf8_output() {
        log::set_max_level(log::LevelFilter::Info);
        let dir = tempfile::TempDir::new().unwrap();
        let marker = dir.path().join("done");
        let script = format!(
            "printf 'ok\\n\\377\\376\\n'; seq 1 20000; touch {}",
            marker.display()
        );

        for policy in [ExitPolicy::Ignore, ExitPolicy::Fail] {
            let runner = SystemRunner::new(policy);
            assert!(runner.run(&Invocation::shell(script.as_str())).is_ok());
            assert!(marker.is_file());
            std::fs::remove_file(&marker).unwrap();
        }
    }

    #[test]
    fn test_fail_policy_reports_status() {
        let runner = SystemRunner::new(ExitPolicy::Fail);
        let result = runner.run(&Invocation::shell("exit 3"));
        match result {
            Err(ExecuteError::CommandStatusError(cmd, code)) => {
                assert_eq!(cmd, "exit 3");
                assert_eq!(code, 3);
            }
            other => panic!("Expected CommandStatusError, got {:?}", other),
        }
    }

    #[test]
    fn test_fail_policy_reports_spawn_error() {
        let runner = SystemRunner::new(ExitPolicy::Fail);
        let result = runner.run(&Invocation::program("definitely-not-a-real-program-xyz"));
        assert!(matches!(result, Err(ExecuteError::CommandFailed(_))));
    }

    #[test]
    fn test_run_in_directory() {
        let dir = std::env::temp_dir();
        let runner = SystemRunner::new(ExitPolicy::Fail);
        let output = runner
            .output(&Invocation::program("pwd").current_dir(&dir))
            .unwrap();
        let reported = std::fs::canonicalize(output.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(&dir).unwrap());
    }
}
