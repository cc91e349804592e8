//! What to run, and how.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::tokenize;

/// The command to run: one string, or an argv vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// A command string. Tokenized unless run through the shell.
    Line(String),
    /// Program and arguments, already split.
    Argv(Vec<String>),
}

impl CommandLine {
    /// True when there is nothing to run.
    pub fn is_empty(&self) -> bool {
        match self {
            CommandLine::Line(line) => line.trim().is_empty(),
            CommandLine::Argv(argv) => argv.first().is_none_or(|program| program.is_empty()),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandLine::Line(line) => f.write_str(line),
            CommandLine::Argv(argv) => f.write_str(&tokenize::join(argv)),
        }
    }
}

impl From<&str> for CommandLine {
    fn from(line: &str) -> Self {
        CommandLine::Line(line.to_string())
    }
}

impl From<String> for CommandLine {
    fn from(line: String) -> Self {
        CommandLine::Line(line)
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(argv: Vec<String>) -> Self {
        CommandLine::Argv(argv)
    }
}

impl From<&[&str]> for CommandLine {
    fn from(argv: &[&str]) -> Self {
        CommandLine::Argv(argv.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for CommandLine {
    fn from(argv: [&str; N]) -> Self {
        CommandLine::Argv(argv.iter().map(|s| s.to_string()).collect())
    }
}

/// Everything needed to run one command.
///
/// Optional settings left unset fall back to the caller's defaults: no
/// timeout, the current directory, and the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub command: CommandLine,
    pub use_shell: bool,
    pub timeout: Option<Duration>,
    pub working_dir: Option<PathBuf>,
    /// When set, this is the child's complete environment. Nothing from the
    /// caller's environment is merged in.
    pub environment: Option<BTreeMap<String, String>>,
}

impl CommandSpec {
    pub fn new(command: impl Into<CommandLine>) -> Self {
        Self {
            command: command.into(),
            use_shell: false,
            timeout: None,
            working_dir: None,
            environment: None,
        }
    }

    /// Run the command through the platform shell.
    pub fn shell(mut self, use_shell: bool) -> Self {
        self.use_shell = use_shell;
        self
    }

    /// Kill the command if it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn working_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Replace the child's environment with `vars`.
    pub fn environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Run this spec. See [`super::run`].
    pub fn run(&self) -> super::ExecutionResult {
        super::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_defaults() {
        let spec = CommandSpec::new("echo hi");
        assert_eq!(spec.command, CommandLine::Line("echo hi".to_string()));
        assert!(!spec.use_shell);
        assert!(spec.timeout.is_none());
        assert!(spec.working_dir.is_none());
        assert!(spec.environment.is_none());
    }

    #[test]
    fn builder_sets_every_field() {
        let spec = CommandSpec::new(["ls", "-la"])
            .shell(true)
            .timeout(Duration::from_secs(3))
            .working_dir("/tmp")
            .environment([("A", "1"), ("B", "2")]);

        assert_eq!(
            spec.command,
            CommandLine::Argv(vec!["ls".to_string(), "-la".to_string()])
        );
        assert!(spec.use_shell);
        assert_eq!(spec.timeout, Some(Duration::from_secs(3)));
        assert_eq!(spec.working_dir, Some(PathBuf::from("/tmp")));
        let env = spec.environment.unwrap();
        assert_eq!(env.len(), 2);
        assert_eq!(env["A"], "1");
    }

    #[test]
    fn empty_commands() {
        assert!(CommandLine::from("").is_empty());
        assert!(CommandLine::from(" \t ").is_empty());
        assert!(CommandLine::Argv(vec![]).is_empty());
        assert!(CommandLine::Argv(vec![String::new(), "x".to_string()]).is_empty());
        assert!(!CommandLine::from("true").is_empty());
        assert!(!CommandLine::from(["true"]).is_empty());
    }

    #[test]
    fn display_quotes_argv() {
        assert_eq!(CommandLine::from("echo 'a b'").to_string(), "echo 'a b'");
        assert_eq!(CommandLine::from(["echo", "a b"]).to_string(), "echo 'a b'");
    }
}
