//! Error types for cmdcap.
//!
//! `RunError` covers everything that can go wrong while running a command.
//! It never leaves the runner: it is folded into the `ExecutionResult`.
//! `CmdcapError` is what the CLI reports for bad arguments or config.

use crate::exit_codes;
use crate::runner::TokenizeError;
use std::io;
use thiserror::Error;

/// Runner-level failure. Rendered into `ExecutionResult::stderr`.
#[derive(Error, Debug)]
pub enum RunError {
    /// Nothing to run.
    #[error("command is empty")]
    EmptyCommand,

    /// The command string could not be split into arguments.
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    /// The process could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Waiting on the process or reading its output failed.
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    /// Reading one of the output pipes failed.
    #[error("failed to read {stream}: {source}")]
    Read {
        stream: &'static str,
        #[source]
        source: io::Error,
    },

    /// An output reader thread panicked.
    #[error("{stream} reader thread panicked")]
    ReaderPanicked { stream: &'static str },

    /// The process really exited with the status reserved for runner failures.
    #[error("process exited with status -1, which is reserved for runner failures")]
    ReservedExitStatus,
}

/// Main error type for the cmdcap CLI.
#[derive(Error, Debug)]
pub enum CmdcapError {
    /// Invalid arguments or input.
    #[error("{0}")]
    UserError(String),

    /// The config file could not be read, parsed, or validated.
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl CmdcapError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CmdcapError::UserError(_) => exit_codes::USER_ERROR,
            CmdcapError::ConfigError(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for cmdcap operations.
pub type Result<T> = std::result::Result<T, CmdcapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = CmdcapError::UserError("bad argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn config_error_has_correct_exit_code() {
        let err = CmdcapError::ConfigError("bad yaml".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert_eq!(err.to_string(), "Config error: bad yaml");
    }

    #[test]
    fn run_error_messages_are_descriptive() {
        assert_eq!(RunError::EmptyCommand.to_string(), "command is empty");

        let err = RunError::Spawn {
            program: "nope".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.to_string(),
            "failed to start 'nope': No such file or directory"
        );

        let err = RunError::Io {
            context: "failed to wait for process",
            source: io::Error::other("boom"),
        };
        assert_eq!(err.to_string(), "failed to wait for process: boom");

        let err = RunError::Read {
            stream: "stderr",
            source: io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"),
        };
        assert_eq!(err.to_string(), "failed to read stderr: broken pipe");

        let err = RunError::ReaderPanicked { stream: "stdout" };
        assert_eq!(err.to_string(), "stdout reader thread panicked");
    }

    #[test]
    fn tokenize_error_is_transparent() {
        let err: RunError = TokenizeError {
            command: "echo \"x".to_string(),
        }
        .into();
        assert!(err.to_string().starts_with("failed to parse command"));
    }
}
