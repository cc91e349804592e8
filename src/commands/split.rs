//! `cmdcap split`: show how a command string is tokenized.

use crate::cli::SplitArgs;
use cmdcap::error::{CmdcapError, Result};
use cmdcap::exit_codes;
use cmdcap::runner::tokenize;

pub fn cmd_split(args: SplitArgs) -> Result<u8> {
    let tokens = tokenize(&args.command).map_err(|e| {
        CmdcapError::UserError(format!(
            "{}\nFix: check for unmatched quotes or invalid escape sequences.",
            e
        ))
    })?;

    if args.json {
        let json = serde_json::to_string(&tokens).map_err(|e| {
            CmdcapError::UserError(format!("failed to serialize tokens to JSON: {}", e))
        })?;
        println!("{}", json);
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    Ok(exit_codes::SUCCESS as u8)
}
