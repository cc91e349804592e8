//! `cmdcap run`: run a command and report the result.

use crate::cli::RunArgs;
use cmdcap::config::Config;
use cmdcap::error::{CmdcapError, Result};
use cmdcap::exit_codes;
use cmdcap::runner::{CommandLine, CommandSpec, ExecutionResult, Outcome};

pub fn cmd_run(args: RunArgs) -> Result<u8> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let spec = build_spec(&config, &args);
    let result = spec.run();

    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(|e| {
            CmdcapError::UserError(format!("failed to serialize result to JSON: {}", e))
        })?;
        println!("{}", json);
    } else {
        print!("{}", result.stdout());
        eprint!("{}", result.stderr());
        if let Some(error) = result.error() {
            eprintln!("Error: {}", error);
        }
    }

    Ok(exit_code_for(&result))
}

/// Layer CLI flags over the config file's defaults.
fn build_spec(config: &Config, args: &RunArgs) -> CommandSpec {
    let command = match args.command.as_slice() {
        [line] => CommandLine::Line(line.clone()),
        argv => CommandLine::Argv(argv.to_vec()),
    };

    let mut spec = config.apply(CommandSpec::new(command));

    if args.shell {
        spec.use_shell = true;
    }
    if let Some(timeout) = args.timeout {
        spec.timeout = Some(timeout);
    }
    if let Some(dir) = &args.cwd {
        spec.working_dir = Some(dir.clone());
    }
    if !args.env.is_empty() {
        spec.environment
            .get_or_insert_with(Default::default)
            .extend(args.env.iter().cloned());
    }

    spec
}

/// Map a result to the process exit code.
fn exit_code_for(result: &ExecutionResult) -> u8 {
    let code = match result.outcome() {
        Outcome::Completed => result.return_code().clamp(0, 255),
        Outcome::TimedOut => exit_codes::TIMED_OUT,
        Outcome::Failed => exit_codes::RUN_FAILURE,
    };
    u8::try_from(code).unwrap_or(u8::MAX)
}
