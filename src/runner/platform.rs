//! Platform shell selection.
//!
//! POSIX hosts run shell scripts through `/bin/sh -c`; Windows hosts use
//! `cmd /C`. The choice is made at compile time.

use std::process::Command;

/// Returns true when built for Windows.
pub fn is_windows() -> bool {
    cfg!(windows)
}

/// The platform's command interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shell {
    /// Interpreter executable.
    pub program: &'static str,
    /// Flag that makes the interpreter run the next argument as a script.
    pub script_flag: &'static str,
}

impl Shell {
    /// The interpreter for the current platform.
    pub fn platform() -> Self {
        if is_windows() {
            Shell {
                program: "cmd",
                script_flag: "/C",
            }
        } else {
            // Absolute so it still resolves when the environment is replaced.
            Shell {
                program: "/bin/sh",
                script_flag: "-c",
            }
        }
    }

    /// Build a command that hands `script` to the interpreter unmodified.
    pub fn command(&self, script: &str) -> Command {
        let mut command = Command::new(self.program);
        command.arg(self.script_flag);
        push_script(&mut command, script);
        command
    }
}

#[cfg(windows)]
fn push_script(command: &mut Command, script: &str) {
    // cmd.exe does its own parsing; quoting it again would change the meaning.
    use std::os::windows::process::CommandExt;
    command.raw_arg(script);
}

#[cfg(not(windows))]
fn push_script(command: &mut Command, script: &str) {
    command.arg(script);
}
