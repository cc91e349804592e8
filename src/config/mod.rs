//! Configuration model for cmdcap.
//!
//! This module defines the Config struct that represents an optional YAML
//! defaults file (passed with `--config`). Every key is optional, unknown
//! keys are preserved and ignored, and values are validated on load.

mod model;
mod operations;


// Re-export public API
pub use model::Config;
