//! Command implementations for cmdcap.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each handler returns the process exit code.

mod run;
mod split;

use crate::cli::Command;
use cmdcap::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<u8> {
    match command {
        Command::Run(args) => run::cmd_run(args),
        Command::Split(args) => split::cmd_split(args),
    }
}
