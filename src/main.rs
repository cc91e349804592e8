//! cmdcap: run a command and report its output and status.
//!
//! This is the main entry point for the `cmdcap` CLI. It parses arguments,
//! sets up logging, dispatches to the command handler, and maps the outcome
//! to an exit code.

mod cli;
mod commands;

use cli::Cli;
use cmdcap::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Err(err) = logging::init(cli.verbose, cli.log_json) {
        eprintln!("Error: {}", err);
        return ExitCode::from(err.exit_code() as u8);
    }

    match commands::dispatch(cli.command) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

