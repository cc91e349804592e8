//! CLI argument parsing for cmdcap.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// cmdcap: run a command and capture its output, exit status, and failures.
///
/// A command that exits on its own passes its exit status through.
/// A command killed by `--timeout` exits 124; one that could not be
/// started exits 125.
#[derive(Parser, Debug)]
#[command(name = "cmdcap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log debug details (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log lines as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for cmdcap.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a command and report what it did.
    ///
    /// A single COMMAND argument is split with shell quoting rules (or handed
    /// to the shell with --shell). Several arguments are used as-is.
    Run(RunArgs),

    /// Show how a command string is split into arguments.
    Split(SplitArgs),
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Run the command through the platform shell.
    #[arg(long)]
    pub shell: bool,

    /// Kill the command after this many seconds (fractions allowed).
    #[arg(short, long, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Directory to run the command in.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Set a variable in the command's environment. When given, these (plus
    /// any from the config file) are the command's entire environment.
    #[arg(short, long = "env", value_name = "KEY=VALUE", value_parser = parse_env_pair)]
    pub env: Vec<(String, String)>,

    /// YAML file with default run settings.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the result as JSON instead of replaying the command's output.
    #[arg(long)]
    pub json: bool,

    /// The command line to run.
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

/// Arguments for the `split` command.
#[derive(Parser, Debug)]
pub struct SplitArgs {
    /// Print the tokens as a JSON array.
    #[arg(long)]
    pub json: bool,

    /// The command string to split.
    pub command: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

fn parse_timeout(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be positive (found '{}')", value));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout '{}': {}", value, e))
}

fn parse_env_pair(value: &str) -> Result<(String, String), String> {
    let (key, val) = value
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, found '{}'", value))?;
    if key.is_empty() {
        return Err(format!("missing variable name in '{}'", value));
    }
    Ok((key.to_string(), val.to_string()))
}
