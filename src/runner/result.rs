//! Execution result.

use serde::Serialize;
use std::fmt::Write as _;
use std::time::Duration;

use crate::error::RunError;

/// Return code reported when the runner itself failed or timed out.
pub const RUNNER_FAILURE_CODE: i32 = -1;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The process exited on its own (with any status).
    Completed,
    /// The timeout expired before the process and its output finished.
    TimedOut,
    /// The process could not be started or talked to.
    Failed,
}

/// Captured output and status of one command.
///
/// `return_code` is `-1` exactly when `error` is set; the constructors are
/// the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    stdout: String,
    stderr: String,
    return_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    outcome: Outcome,
}

impl ExecutionResult {
    pub(crate) fn completed(stdout: String, stderr: String, return_code: i32) -> Self {
        if return_code == RUNNER_FAILURE_CODE {
            return Self::failed(&RunError::ReservedExitStatus);
        }
        Self {
            stdout,
            stderr,
            return_code,
            error: None,
            outcome: Outcome::Completed,
        }
    }

    pub(crate) fn timeout(stdout: String, stderr: String, timeout: Duration) -> Self {
        Self {
            stdout,
            stderr,
            return_code: RUNNER_FAILURE_CODE,
            error: Some(format!(
                "command timed out after {}",
                format_duration(timeout)
            )),
            outcome: Outcome::TimedOut,
        }
    }

    pub(crate) fn failed(err: &RunError) -> Self {
        Self {
            stdout: String::new(),
            stderr: err.to_string(),
            return_code: RUNNER_FAILURE_CODE,
            error: Some(format!("error executing command: {}", err)),
            outcome: Outcome::Failed,
        }
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Exit status of the process, or `-1` if the runner failed.
    pub fn return_code(&self) -> i32 {
        self.return_code
    }

    /// Runner failure message. Present only when `return_code() == -1`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn timed_out(&self) -> bool {
        self.outcome == Outcome::TimedOut
    }

    /// True when the process completed with status 0.
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Completed && self.return_code == 0
    }

    pub fn into_output(self) -> (String, String) {
        (self.stdout, self.stderr)
    }
}

/// Render a duration compactly: `1s`, `1.5s`, `250ms`.
pub(crate) fn format_duration(d: Duration) -> String {
    let millis = d.as_millis();
    if millis < 1000 {
        return format!("{}ms", millis);
    }

    let mut out = format!("{}", d.as_secs());
    let frac = d.subsec_millis();
    if frac != 0 {
        let digits = format!("{:03}", frac);
        let _ = write!(out, ".{}", digits.trim_end_matches('0'));
    }
    out.push('s');
    out
}
