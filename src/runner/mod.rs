//! Run one external command and capture what it did.
//!
//! A run is a straight line: prepare the command, spawn it with both output
//! pipes captured, wait for it (bounded by the optional timeout), then
//! classify what happened into an [`ExecutionResult`]:
//!
//! - **Completed**: the process exited on its own. A non-zero status is not
//!   a runner failure; it is only logged as a warning.
//! - **Timed out**: the deadline passed. A still-running process is killed
//!   and reaped before returning; if it had exited but left its pipes open
//!   (e.g. a background job), reading stops at the deadline. Output read so
//!   far is kept.
//! - **Failed**: the process could not be started or talked to.
//!
//! [`run`] never returns an error and never panics on a bad command. Callers
//! check `return_code()` and `error()`.

mod capture;
mod platform;
mod result;
mod spec;
mod tokenize;


pub use platform::{Shell, is_windows};
pub use result::{ExecutionResult, Outcome, RUNNER_FAILURE_CODE};
pub use spec::{CommandLine, CommandSpec};
pub use tokenize::{TokenizeError, join, tokenize};

use crate::error::RunError;
use capture::{CaptureError, PipeReader, decode};
use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Shortest sleep between exit checks while a timeout is armed.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Longest sleep between exit checks while a timeout is armed.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How long both output readers together may keep draining after a
/// timed-out child is killed.
const KILL_GRACE: Duration = Duration::from_millis(250);

/// Run `spec` to completion, timeout, or failure.
pub fn run(spec: &CommandSpec) -> ExecutionResult {
    info!(command = %spec.command, shell = spec.use_shell, "executing command");

    let result = execute(spec).unwrap_or_else(|e| ExecutionResult::failed(&e));

    match result.outcome() {
        Outcome::Completed => {
            debug!(return_code = result.return_code(), "command exited");
            if result.return_code() != 0 {
                warn!(
                    return_code = result.return_code(),
                    stderr = %result.stderr(),
                    "command exited with non-zero status"
                );
            }
        }
        Outcome::TimedOut | Outcome::Failed => {
            error!(error = result.error().unwrap_or_default(), "command did not complete");
        }
    }

    result
}

fn execute(spec: &CommandSpec) -> Result<ExecutionResult, RunError> {
    let mut command = prepare(spec)?;
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = command
        .spawn()
        .map_err(|source| RunError::Spawn { program, source })?;

    let (stdout, stderr) = match start_readers(&mut child) {
        Ok(readers) => readers,
        Err(e) => {
            kill_process(&mut child);
            return Err(e);
        }
    };

    // A timeout too far out for the clock to represent never fires.
    let armed = spec
        .timeout
        .and_then(|timeout| Some((timeout, Instant::now().checked_add(timeout)?)));
    let waited = match armed {
        Some((timeout, deadline)) => wait_with_timeout(&mut child, timeout, deadline)?,
        None => Wait::Exited(child.wait().map_err(|source| RunError::Io {
            context: "failed to wait for process",
            source,
        })?),
    };

    match waited {
        Wait::Exited(status) => {
            // Something the child left running can keep the pipes open past
            // its exit; the timeout still bounds the whole call.
            if let Some((timeout, deadline)) = armed
                && !(stdout.wait_until(deadline) && stderr.wait_until(deadline))
            {
                let now = Instant::now();
                return Ok(ExecutionResult::timeout(
                    decode(&stdout.snapshot(now)),
                    decode(&stderr.snapshot(now)),
                    timeout,
                ));
            }

            let stdout = finish_reader(stdout, "stdout")?;
            let stderr = finish_reader(stderr, "stderr")?;
            Ok(ExecutionResult::completed(
                decode(&stdout),
                decode(&stderr),
                exit_code(status),
            ))
        }
        Wait::Killed(timeout) => {
            // One grace window shared by both readers, not one each.
            let deadline = Instant::now() + KILL_GRACE;
            let stdout = stdout.snapshot(deadline);
            let stderr = stderr.snapshot(deadline);
            Ok(ExecutionResult::timeout(
                decode(&stdout),
                decode(&stderr),
                timeout,
            ))
        }
    }
}

/// Build the `Command` for `spec`: shell script or argv, plus directory and
/// environment overrides.
fn prepare(spec: &CommandSpec) -> Result<Command, RunError> {
    if spec.command.is_empty() {
        return Err(RunError::EmptyCommand);
    }

    let mut command = if spec.use_shell {
        let script = match &spec.command {
            CommandLine::Line(line) => line.clone(),
            CommandLine::Argv(argv) => join(argv),
        };
        Shell::platform().command(&script)
    } else {
        let argv = match &spec.command {
            CommandLine::Line(line) => tokenize(line)?,
            CommandLine::Argv(argv) => argv.clone(),
        };
        let (program, args) = argv.split_first().ok_or(RunError::EmptyCommand)?;
        let mut command = Command::new(program);
        command.args(args);
        command
    };

    if let Some(dir) = &spec.working_dir {
        command.current_dir(dir);
    }

    if let Some(env) = &spec.environment {
        command.env_clear().envs(env);
    }

    Ok(command)
}

fn start_readers(child: &mut Child) -> Result<(PipeReader, PipeReader), RunError> {
    let stdout = child.stdout.take().ok_or_else(|| missing_pipe("stdout"))?;
    let stderr = child.stderr.take().ok_or_else(|| missing_pipe("stderr"))?;

    let spawn_failed = |source| RunError::Io {
        context: "failed to start output reader",
        source,
    };
    let stdout = PipeReader::spawn("stdout", stdout).map_err(spawn_failed)?;
    let stderr = PipeReader::spawn("stderr", stderr).map_err(spawn_failed)?;
    Ok((stdout, stderr))
}

fn missing_pipe(stream: &'static str) -> RunError {
    RunError::Io {
        context: "failed to capture output",
        source: io::Error::other(format!("{} pipe was not opened", stream)),
    }
}

fn finish_reader(reader: PipeReader, stream: &'static str) -> Result<Vec<u8>, RunError> {
    reader.finish().map_err(|e| match e {
        CaptureError::Io(source) => RunError::Read { stream, source },
        CaptureError::Panicked => RunError::ReaderPanicked { stream },
    })
}

/// How waiting on the child ended.
enum Wait {
    Exited(ExitStatus),
    /// Killed after running past the timeout.
    Killed(Duration),
}

/// Wait for the child, killing it once `deadline` passes.
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
    deadline: Instant,
) -> Result<Wait, RunError> {
    let mut poll_interval = MIN_POLL_INTERVAL;

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Wait::Exited(status)),
            Ok(None) => {
                let now = Instant::now();
                if now >= deadline {
                    kill_process(child);
                    return Ok(Wait::Killed(timeout));
                }
                thread::sleep(poll_interval.min(deadline - now));
                poll_interval = (poll_interval * 2).min(MAX_POLL_INTERVAL);
            }
            Err(source) => {
                kill_process(child);
                return Err(RunError::Io {
                    context: "failed to check process status",
                    source,
                });
            }
        }
    }
}

/// Kill a process and reap it.
fn kill_process(child: &mut Child) {
    // SIGKILL on Unix, TerminateProcess on Windows. Errors mean it already exited.
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    // Killed by a signal: report it the way a shell would.
    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(128)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(RUNNER_FAILURE_CODE)
}
