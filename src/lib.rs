//! cmdcap: run an external command and capture what it did.
//!
//! ```no_run
//! use cmdcap::CommandSpec;
//! use std::time::Duration;
//!
//! let result = CommandSpec::new("git status --short")
//!     .timeout(Duration::from_secs(10))
//!     .run();
//!
//! if let Some(error) = result.error() {
//!     eprintln!("{}", error);
//! } else {
//!     print!("{}", result.stdout());
//! }
//! ```

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod runner;

pub use runner::{CommandLine, CommandSpec, ExecutionResult, Outcome, run};
